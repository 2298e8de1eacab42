//! Numeric error codes returned in the `code` field of API error bodies.

const CODES: &[(u16, &str)] = &[
    (0, "Ok"),
    (1, "Invalid request"),
    (2, "Internal error"),
    (3, "Invalid user or password"),
    (4, "No accounts for user"),
    (5, "Unknown account"),
    (6, "Not authenticated"),
    (7, "Unauthorized"),
    (8, "Not found"),
    (9, "Customer not found"),
    (10, "Subscription plan not found"),
    (11, "Duplicate handle"),
    (12, "Subscription not found"),
    (13, "Subscription expired"),
    (14, "Must be in future"),
    (15, "Account not found"),
    (17, "User not found"),
    (18, "Missing customer"),
    (19, "Card not found"),
    (20, "Test data not allowed for live account"),
    (21, "Live data not allowed for test account"),
    (22, "Subscription cancelled"),
    (23, "From date after to date"),
    (24, "Missing amount"),
    (25, "Additional cost not pending"),
    (26, "Additional cost not found"),
    (27, "Credit not found"),
    (28, "Credit not pending"),
    (29, "Invoice already cancelled"),
    (30, "Invoice has active transactions"),
    (31, "Invoice not found"),
    (32, "Customer has non expired subscriptions"),
    (33, "Customer has pending invoices"),
    (34, "Invalid card token"),
    (35, "Missing card"),
    (36, "Missing card token"),
    (37, "Start date cannot be more than one period away in the past"),
    (38, "Card not allowed for signup method"),
    (39, "Card token not allowed for signup method"),
    (40, "Payment method not found"),
    (41, "Payment method not inactive"),
    (42, "Payment method not active"),
    (43, "Not implemented"),
    (44, "Dunning plan not found"),
    (45, "Organisation not found"),
    (46, "Webhook not found"),
    (47, "Event not found"),
    (48, "Dunning plan in use"),
    (49, "Last dunning plan"),
    (50, "Search error"),
    (51, "Private key not found"),
    (52, "Public key not found"),
    (53, "Mail not found"),
    (54, "No order lines for invoice"),
    (55, "Agreement not found"),
    (56, "Multiple agreements"),
    (57, "Duplicate email"),
    (58, "Invalid group"),
    (59, "User blocked due to failed logins"),
    (60, "Invalid template"),
    (61, "Mail type not found"),
    (62, "Card gateway state live/test much match account state live/test"),
    (63, "Subscription has pending or dunning invoices"),
    (64, "Invoice not settled"),
    (65, "Refund amount too high"),
    (66, "Refund failed"),
    (67, "The subdomain is reserved"),
    (68, "User email already verified"),
    (69, "Go live not allowed"),
    (70, "Transaction not found"),
    (71, "Customer has been deleted"),
    (72, "Currency change not allowed"),
    (73, "Invalid reminder emails days"),
    (74, "Concurrent resource update"),
    (75, "Subscription not eligible for invoice"),
    (76, "Payment method not provided"),
    (77, "Transaction declined"),
    (78, "Transaction processing error"),
    (79, "Invoice already settled"),
    (80, "Invoice has processing transaction"),
    (81, "Online refund not supported, use manual refund"),
    (82, "Invoice wrong state"),
    (83, "Discount not found"),
    (84, "Subscription discount not found"),
    (85, "Multiple discounts not allowed"),
    (86, "Coupon not found or not eligible"),
    (87, "Coupon already used"),
    (88, "Coupon code already exists"),
    (89, "Used coupon cannot be deleted"),
    (90, "Coupon not active"),
    (91, "Coupon cannot be updated"),
    (93, "Cannot expire in current period"),
    (94, "Cannot uncancel in partial period"),
    (95, "Subscription on hold"),
    (96, "Subscription in trial"),
    (97, "Subscription not on hold"),
    (98, "Invalid setup token"),
    (99, "Customer cannot be changed on invoice"),
    (100, "Amount change not allowed on invoice"),
    (101, "Request does not belong to invoice"),
    (102, "Amount higher than authorized amount"),
    (103, "Card token already used"),
    (104, "Card token expired"),
    (105, "Invoice already authorized"),
    (106, "Invoice must be authorized"),
    (107, "Refund not found"),
    (108, "Transaction cancel failed"),
    (109, "Transaction wrong state for operation"),
    (110, "Unknown or missing source"),
    (111, "Source not allowed for signup method"),
    (112, "Invoice wrong type"),
    (113, "Add-on not found"),
    (114, "Add-on already added to subscription"),
    (115, "Add-on quantity not allowed for on-off add-on type"),
    (116, "Add-on not eligible for subscription plan"),
    (117, "Subscription add-on not found"),
    (118, "Subscription pending"),
    (119, "Subscription must be pending"),
    (120, "Credit amount too high"),
    (121, "Discount is deleted"),
    (122, "Request rate limit exceeded"),
    (123, "Concurrent request limit exceeded"),
    (124, "Payment method in use"),
    (125, "Subscription has pending payment method"),
    (127, "Payment method not pending"),
    (128, "Payment method pending"),
    (129, "Multiple settles not allowed for payment method"),
    (130, "Partial settle not allowed for payment method"),
    (131, "Multiple refunds not allowed for payment method"),
    (132, "Partial refund not allowed for payment method"),
    (133, "Payout processing"),
    (134, "Payout already paid"),
    (135, "Payment method not allowed for payout"),
    (136, "Customer cannot be changed on payout"),
    (137, "Payout not found"),
    (138, "No suitable card verification agreement found"),
    (139, "Currency not supported by payment method"),
    (140, "Source type must be reusable"),
    (141, "Too many settle attempts"),
    (142, "Invalid MFA verification code"),
    (143, "MFA authentication required"),
    (144, "Query took too long, adjust time range"),
    (145, "Invoice has zero amount"),
    (146, "Non positive amount"),
    (147, "Payment method failed"),
    (148, "Mfa code expired"),
    (149, "Cannot activate VTS"),
    (150, "Subscription product not found"),
    (151, "Account funding only allowed for instant settle"),
    (152, "VTS token requestor already exists"),
    (153, "Add-on type update from 'quantity' to 'on-off' is not allowed"),
    (154, "Currency mismatch"),
    (155, "EMV Token requestor onboarding failed"),
    (156, "Customer not allowed to perform operation"),
    (157, "Tax policy not found"),
    (158, "Tax policy cannot be deleted"),
    (159, "Invoice accounting number not present on invoice"),
    (160, "Credit note not found"),
    (161, "Customer debtor id already exists on another customer"),
    (162, "Customer debtor id cannot be changed once set"),
    (163, "Supported language not found"),
    (164, "Accounting export not found"),
    (165, "Accounting export storage error"),
    (166, "Accounting export cannot be disabled once enabled"),
    (167, "Accounting export configuration saving is not successful"),
];

/// Short English description of an API error code.
pub fn describe(code: u16) -> Option<&'static str> {
    CODES
        .binary_search_by_key(&code, |(known, _)| *known)
        .ok()
        .map(|index| CODES[index].1)
}

/// Every documented code with its description, in ascending order.
pub fn all() -> impl Iterator<Item = (u16, &'static str)> {
    CODES.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_sorted_and_unique() {
        assert!(CODES.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn describes_documented_codes() {
        assert_eq!(describe(0), Some("Ok"));
        assert_eq!(describe(12), Some("Subscription not found"));
        assert_eq!(describe(31), Some("Invoice not found"));
    }

    #[test]
    fn gaps_are_unknown() {
        assert_eq!(describe(16), None);
        assert_eq!(describe(u16::MAX), None);
    }
}
