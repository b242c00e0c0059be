// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! RPC bindings for the shop contracts.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IMyToken {
        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address owner) external view returns (uint256);
        function transfer(address to, uint256 value) external returns (bool);
        function transferFrom(address from, address to, uint256 value) external returns (bool);
        function approve(address spender, uint256 value) external returns (bool);
        function allowance(address owner, address spender) external view returns (uint256);

        function mint(address to, uint256 amount) external;
        function burn(uint256 amount) external;
        function burnFrom(address account, uint256 amount) external;
        function MINTER_ROLE() external view returns (bytes32);

        function clock() external view returns (uint64);
        function CLOCK_MODE() external view returns (string memory);
        function delegates(address account) external view returns (address);
        function delegate(address delegatee) external;
        function getVotes(address account) external view returns (uint256);
        function getPastVotes(address account, uint256 timepoint) external view returns (uint256);
        function getPastTotalSupply(uint256 timepoint) external view returns (uint256);
        function numCheckpoints(address account) external view returns (uint32);

        function DEFAULT_ADMIN_ROLE() external view returns (bytes32);
        function hasRole(bytes32 role, address account) external view returns (bool);
        function getRoleAdmin(bytes32 role) external view returns (bytes32);
        function grantRole(bytes32 role, address account) external;
        function revokeRole(bytes32 role, address account) external;
        function renounceRole(bytes32 role, address caller_confirmation) external;

        event Transfer(address indexed from, address indexed to, uint256 value);
        event Approval(address indexed owner, address indexed spender, uint256 value);
        event DelegateChanged(address indexed delegator, address indexed from_delegate, address indexed to_delegate);
        event DelegateVotesChanged(address indexed delegate, uint256 previous_votes, uint256 new_votes);

        error InsufficientBalance(address from, uint256 have, uint256 want);
        error InsufficientAllowance(address owner, address spender, uint256 have, uint256 want);
        error InvalidReceiver(address receiver);
        error ERC5805FutureLookup(uint256 timepoint, uint64 clock);
        error CheckpointOutOfBounds(address account, uint32 pos);
        error SupplyOverflow(uint256 supply, uint256 value);
        error AccessControlUnauthorizedAccount(address account, bytes32 needed_role);
        error AccessControlBadConfirmation();
    }

    #[sol(rpc)]
    interface IMyNft {
        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function tokenURI(uint256 token_id) external view returns (string memory);
        function balanceOf(address owner) external view returns (uint256);
        function ownerOf(uint256 token_id) external view returns (address);
        function totalSupply() external view returns (uint256);
        function transferFrom(address from, address to, uint256 token_id) external;
        function approve(address approved, uint256 token_id) external;
        function setApprovalForAll(address operator, bool approved) external;
        function getApproved(uint256 token_id) external view returns (address);
        function isApprovedForAll(address owner, address operator) external view returns (bool);
        function supportsInterface(bytes4 interface_id) external view returns (bool);

        function safeMint(address to, uint256 token_id) external;
        function burn(uint256 token_id) external;

        function hasRole(bytes32 role, address account) external view returns (bool);
        function grantRole(bytes32 role, address account) external;

        event Transfer(address indexed from, address indexed to, uint256 indexed token_id);

        error InvalidTokenId(uint256 token_id);
        error NotOwner(address from, uint256 token_id, address real_owner);
        error NotApproved(address owner, address spender, uint256 token_id);
        error TransferToZero(uint256 token_id);
        error TokenAlreadyMinted(uint256 token_id);
        error AccessControlUnauthorizedAccount(address account, bytes32 needed_role);
    }

    #[sol(rpc)]
    interface ITokenSale {
        function ratio() external view returns (uint256);
        function price() external view returns (uint256);
        function token() external view returns (address);
        function nft() external view returns (address);
        function owner() external view returns (address);
        function ownerPool() external view returns (uint256);

        function buy() external payable;
        function returnToken(uint256 amount) external;
        function buyNFT(uint256 token_id) external;
        function burnNFT(uint256 token_id) external;
        function withdraw(uint256 amount) external;

        event TokensBought(address indexed buyer, uint256 paid, uint256 amount);
        event TokensReturned(address indexed seller, uint256 amount, uint256 refund);
        event NftBought(address indexed buyer, uint256 indexed token_id, uint256 price);
        event NftRedeemed(address indexed seller, uint256 indexed token_id, uint256 refund);
        event Withdrawn(address indexed owner, uint256 amount);

        error InvalidRatio();
        error Unauthorized(address account);
        error InsufficientEth(uint256 have, uint256 want);
        error InsufficientPool(uint256 pool, uint256 want);
        error PaymentFailed(address token, address from, uint256 amount);
        error PurchaseOverflow(uint256 paid, uint256 ratio);
        error PoolOverflow(uint256 pool, uint256 share);
        error NotSold(uint256 token_id);
    }
}
