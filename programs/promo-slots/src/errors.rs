use anchor_lang::prelude::*;

#[error_code]
pub enum EngineError {
    // Permission errors
    #[msg("Signer is not authorized for this action")]
    Unauthorized,
    #[msg("This action requires the engine admin")]
    AdminOnly,

    // Input validation errors
    #[msg("Duration is outside the configured bounds")]
    InvalidDuration,
    #[msg("No receiving wallet is configured for this payment chain")]
    UnsupportedChain,
    #[msg("category_key is required for category_top placement")]
    CategoryKeyRequired,
    #[msg("category_key is not allowed for homepage placement")]
    CategoryKeyNotAllowed,
    #[msg("category_key exceeds the maximum length")]
    CategoryKeyTooLong,
    #[msg("Transaction hash must not be empty")]
    TxHashRequired,
    #[msg("Transaction hash exceeds the maximum length")]
    TxHashTooLong,
    #[msg("Screenshot URI exceeds the maximum length")]
    ScreenshotUriTooLong,
    #[msg("Wallet address must not be empty")]
    WalletAddressRequired,
    #[msg("Wallet address exceeds the maximum length")]
    WalletAddressTooLong,
    #[msg("Rejection reason must not be empty")]
    RejectionReasonRequired,
    #[msg("Rejection reason exceeds the maximum length")]
    RejectionReasonTooLong,
    #[msg("Pool capacity must be at least 1")]
    InvalidCapacity,
    #[msg("Price computation overflowed")]
    PriceOverflow,
    #[msg("Chain wallet list is full")]
    ChainWalletListFull,

    // State-machine errors
    #[msg("Order is not in a state that allows this transition")]
    InvalidState,
    #[msg("Payment proof was already submitted and cannot be replaced")]
    AlreadySubmitted,
    #[msg("Order version does not match; re-fetch and retry")]
    ConcurrentModification,

    // Admission errors
    #[msg("No slot capacity available for the requested window")]
    CapacityExceeded,
    #[msg("Slot pool entry arena is full")]
    PoolSaturated,
    #[msg("Reservation not found in the slot pool")]
    ReservationNotFound,
    #[msg("Slot pool account is required to release this reservation")]
    MissingPoolAccount,

    // Sweep errors
    #[msg("Order has not reached its expiry time yet")]
    NotYetExpired,
}
