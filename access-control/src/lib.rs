// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Role-based access control for the shop contracts.
//!
//! [`AccessControl`] is meant to be embedded in a contract with `#[borrow]` and
//! inherited with `#[inherit(AccessControl)]`. Every role is administered by
//! another role, [`DEFAULT_ADMIN_ROLE`] unless changed, and accounts holding the
//! admin role may grant or revoke it.

extern crate alloc;

use alloy_primitives::{Address, FixedBytes, B256};
use alloy_sol_types::sol;
use stylus_sdk::{keccak_const::Keccak256, prelude::*};

/// Administers every role that has no explicit admin.
pub const DEFAULT_ADMIN_ROLE: [u8; 32] = [0; 32];

/// Role allowed to create new token units.
pub const MINTER_ROLE: [u8; 32] = Keccak256::new().update(b"MINTER_ROLE").finalize();

sol_storage! {
    /// Tracks which accounts hold which roles.
    pub struct AccessControl {
        /// Role to account membership
        mapping(bytes32 => mapping(address => bool)) roles;
        /// Role to the role allowed to grant and revoke it
        mapping(bytes32 => bytes32) role_admins;
    }
}

sol! {
    event RoleGranted(bytes32 indexed role, address indexed account, address indexed sender);
    event RoleRevoked(bytes32 indexed role, address indexed account, address indexed sender);
    event RoleAdminChanged(bytes32 indexed role, bytes32 indexed previous_admin_role, bytes32 indexed new_admin_role);

    #[derive(Debug)]
    error AccessControlUnauthorizedAccount(address account, bytes32 needed_role);
    #[derive(Debug)]
    error AccessControlBadConfirmation();
}

#[derive(SolidityError, Debug)]
pub enum AccessControlError {
    AccessControlUnauthorizedAccount(AccessControlUnauthorizedAccount),
    AccessControlBadConfirmation(AccessControlBadConfirmation),
}

impl AccessControl {
    /// Fails unless `msg_sender` holds `role`.
    pub fn only_role(&self, role: B256) -> Result<(), AccessControlError> {
        self.check_role(role, self.vm().msg_sender())
    }

    /// Fails unless `account` holds `role`.
    pub fn check_role(&self, role: B256, account: Address) -> Result<(), AccessControlError> {
        if !self.has_role(role, account) {
            return Err(AccessControlError::AccessControlUnauthorizedAccount(
                AccessControlUnauthorizedAccount {
                    account,
                    needed_role: role,
                },
            ));
        }
        Ok(())
    }

    /// Grants `role` without checking the caller. Returns whether anything changed.
    pub fn grant_role_unchecked(&mut self, role: B256, account: Address) -> bool {
        if self.has_role(role, account) {
            return false;
        }
        self.roles.setter(role).insert(account, true);
        self.vm().log(RoleGranted {
            role,
            account,
            sender: self.vm().msg_sender(),
        });
        true
    }

    /// Revokes `role` without checking the caller. Returns whether anything changed.
    pub fn revoke_role_unchecked(&mut self, role: B256, account: Address) -> bool {
        if !self.has_role(role, account) {
            return false;
        }
        self.roles.setter(role).insert(account, false);
        self.vm().log(RoleRevoked {
            role,
            account,
            sender: self.vm().msg_sender(),
        });
        true
    }

    /// Changes the role administering `role`.
    pub fn set_role_admin(&mut self, role: B256, admin_role: B256) {
        let previous_admin_role = self.get_role_admin(role);
        self.role_admins.insert(role, admin_role);
        self.vm().log(RoleAdminChanged {
            role,
            previous_admin_role,
            new_admin_role: admin_role,
        });
    }
}

#[public]
impl AccessControl {
    #[selector(name = "DEFAULT_ADMIN_ROLE")]
    pub fn default_admin_role() -> B256 {
        FixedBytes(DEFAULT_ADMIN_ROLE)
    }

    pub fn has_role(&self, role: B256, account: Address) -> bool {
        self.roles.getter(role).get(account)
    }

    pub fn get_role_admin(&self, role: B256) -> B256 {
        self.role_admins.get(role)
    }

    /// Grants `role` to `account`; the caller must hold the role's admin role.
    pub fn grant_role(&mut self, role: B256, account: Address) -> Result<(), AccessControlError> {
        self.only_role(self.get_role_admin(role))?;
        self.grant_role_unchecked(role, account);
        Ok(())
    }

    /// Revokes `role` from `account`; the caller must hold the role's admin role.
    pub fn revoke_role(&mut self, role: B256, account: Address) -> Result<(), AccessControlError> {
        self.only_role(self.get_role_admin(role))?;
        self.revoke_role_unchecked(role, account);
        Ok(())
    }

    /// Drops `role` from the caller, who must pass their own address as confirmation.
    pub fn renounce_role(
        &mut self,
        role: B256,
        caller_confirmation: Address,
    ) -> Result<(), AccessControlError> {
        if caller_confirmation != self.vm().msg_sender() {
            return Err(AccessControlError::AccessControlBadConfirmation(
                AccessControlBadConfirmation {},
            ));
        }
        self.revoke_role_unchecked(role, caller_confirmation);
        Ok(())
    }
}
