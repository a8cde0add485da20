//! Status reason codes reported by the gateway on rejected transactions

use crate::{Result, VposError};

/// Every status reason code the gateway documents, ordered by code
pub const STATUS_REASONS: &[(i64, &str)] = &[
    (1000, "Generic gateway error"),
    (1001, "Request timed-out and will not be processed"),
    (
        1002,
        "Gateway is not authorized to execute transactions on the specified POS",
    ),
    (
        1003,
        "Parent transaction ID of refund request is not an accepted Payment",
    ),
    (2000, "Generic processor error"),
    (2001, "Insufficient funds in client's account"),
    (2002, "Refused by the card issuer"),
    (2003, "Card or network daily limit exceeded"),
    (2004, "Request timed-out and was refused by the processor"),
    (2005, "POS is closed and unable to accept transactions"),
    (2006, "Insufficient funds in POS available for refund"),
    (2007, "Invalid or Inactive supervisor card"),
    (2008, "Invalid merchant email"),
    (2009, "Parent transaction is too old to be refunded"),
    (2010, "Request was refused by the processor"),
    (3000, "Refused by client"),
];

/// Look up the description of a status reason code
pub fn status_reason(code: i64) -> Result<&'static str> {
    STATUS_REASONS
        .binary_search_by_key(&code, |(known, _)| *known)
        .map(|index| STATUS_REASONS[index].1)
        .map_err(|_| VposError::StatusReasonNotFound { code })
}
