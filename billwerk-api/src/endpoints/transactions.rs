use crate::endpoints::payment_methods::Card;
use crate::macros::{wire_enum, wire_family, wire_record};
use crate::mapper::{Polymorphic, RegistryBuilder, RegistryError, WireMap};
use crate::transport::Endpoint;
use chrono::{DateTime, Utc};
use std::borrow::Cow;

// Common

wire_enum! {
    pub enum TransactionState {
        Pending = "pending",
        Processing = "processing",
        Authorized = "authorized",
        Settled = "settled",
        Refunded = "refunded",
        Failed = "failed",
        Cancelled = "cancelled",
    }
}

wire_enum! {
    pub enum TransactionType {
        Settle = "settle",
        Refund = "refund",
        Authorization = "authorization",
    }
}

wire_enum! {
    pub enum ErrorState {
        Pending = "pending",
        SoftDeclined = "soft_declined",
        HardDeclined = "hard_declined",
        ProcessingError = "processing_error",
    }
}

wire_enum! {
    /// Why the acquirer or the risk filter refused a transaction.
    pub enum TransactionError {
        CreditCardExpired = "credit_card_expired",
        DeclinedByAcquirer = "declined_by_acquirer",
        CreditCardLostOrStolen = "credit_card_lost_or_stolen",
        CreditCardSuspectedFraud = "credit_card_suspected_fraud",
        RefundAmountTooHigh = "refund_amount_too_high",
        AuthorizationExpired = "authorization_expired",
        AuthorizationAmountExceeded = "authorization_amount_exceeded",
        AuthorizationVoided = "authorization_voided",
        ScaRequired = "sca_required",
        RiskFilterBlock = "risk_filter_block",
        InsufficientFunds = "insufficient_funds",
        SettleBlocked = "settle_blocked",
        AcquirerCommunicationError = "acquirer_communication_error",
        AcquirerError = "acquirer_error",
        AcquirerIntegrationError = "acquirer_integration_error",
        AcquirerAuthenticationError = "acquirer_authentication_error",
        AcquirerConfigurationError = "acquirer_configuration_error",
        AcquirerRejectedError = "acquirer_rejected_error",
        CardIdentifierNotFound = "card_identifier_not_found",
        ProcessingError = "processing_error",
    }
}

wire_enum! {
    pub enum CardType {
        Unknown = "unknown",
        Visa = "visa",
        Mastercard = "mc",
        Dankort = "dankort",
        VisaDankort = "visa_dk",
        Ffk = "ffk",
        VisaElectron = "visa_elec",
        Maestro = "maestro",
        Laser = "laser",
        Amex = "amex",
        Diners = "diners",
        Discover = "discover",
        Jcb = "jcb",
        ChinaUnionPay = "china_union_pay",
    }
}

wire_enum! {
    /// Card acquirer that processed the transaction.
    pub enum CardProvider {
        Reepay = "reepay",
        Clearhaus = "clearhaus",
        Nets = "nets",
        Swedbank = "swedbank",
        Handelsbanken = "handelsbanken",
        Elavon = "elavon",
        Bambora = "bambora",
        Valitor = "valitor",
        Dandomain = "dandomain",
        Test = "test",
        Worldline = "worldline",
    }
}

wire_enum! {
    pub enum StrongAuthenticationStatus {
        ThreedSecure = "threed_secure",
        ThreedSecureNotEnrolled = "threed_secure_not_enrolled",
        SecuredByNets = "secured_by_nets",
    }
}

wire_enum! {
    pub enum MpsPaymentType {
        Regular = "regular",
        OneOff = "one_off",
    }
}

wire_record! {
    /// Fields every payment-method specific transaction carries.
    pub struct TransactionCommon: response "transaction_details" {
        /// Kept as sent, see [`TransactionCommon::error_kind`]
        optional error: String = "error",
        optional ref_transaction: String = "ref_transaction",
        optional error_state: ErrorState = "error_state",
        optional acquirer_message: String = "acquirer_message",
    }
}

impl TransactionCommon {
    /// `error` as a known code, `None` for codes this client does not know.
    pub fn error_kind(&self) -> Option<TransactionError> {
        self.error.as_deref().and_then(TransactionError::parse)
    }
}

wire_record! {
    pub struct CardTransaction: response "card_transaction" extends common: TransactionCommon {
        /// Saved card used for the transaction, if any
        optional card: Card = "card",
        optional fingerprint: String = "fingerprint",
        optional provider: CardProvider = "provider",
        optional frictionless: bool = "frictionless",
        optional gw_id: String = "gw_id",
        optional last_failed: DateTime<Utc> = "last_failed",
        optional first_failed: DateTime<Utc> = "first_failed",
        required_enum card_type: CardType = "card_type",
        optional transaction_card_type: CardType = "transaction_card_type",
        optional exp_date: String = "exp_date",
        optional masked_card: String = "masked_card",
        optional card_country: String = "card_country",
        optional strong_authentication_status: StrongAuthenticationStatus =
            "strong_authentication_status",
        optional three_d_secure_status: String = "three_d_secure_status",
        optional risk_rule: String = "risk_rule",
        optional acquirer_code: String = "acquirer_code",
        optional acquirer_reference: String = "acquirer_reference",
        optional text_on_statement: String = "text_on_statement",
        optional surcharge_fee: i64 = "surcharge_fee",
    }
}

wire_record! {
    /// MobilePay Subscriptions
    pub struct MpsTransaction: response "mps_transaction" extends common: TransactionCommon {
        required mps_id: String = "mps_id",
        optional mps_subscription: WireMap = "mps_subscription",
        required_enum mps_payment_type: MpsPaymentType = "mps_payment_type",
    }
}

wire_record! {
    pub struct VippsTransaction: response "vipps_transaction" extends common: TransactionCommon {
        optional vipps_id: String = "vipps_id",
        optional vipps_recurring_id: String = "vipps_recurring_id",
    }
}

wire_record! {
    pub struct SwishTransaction: response "swish_transaction" extends common: TransactionCommon {
        optional swish_id: String = "swish_id",
    }
}

wire_record! {
    pub struct ViabillTransaction: response "viabill_transaction"
        extends common: TransactionCommon {
        optional viabill_id: String = "viabill_id",
    }
}

wire_record! {
    /// Payment registered by hand, e.g. a bank transfer reconciled outside the platform.
    pub struct ManualTransaction: response "manual_transaction" extends common: TransactionCommon {
        required method: String = "method",
        optional reference: String = "reference",
        optional comment: String = "comment",
        required payment_date: DateTime<Utc> = "payment_date",
    }
}

wire_record! {
    pub struct AnydayTransaction: response "anyday_transaction" extends common: TransactionCommon {
        optional anyday_id: String = "anyday_id",
    }
}

wire_record! {
    pub struct ResursTransaction: response "resurs_transaction" extends common: TransactionCommon {
        optional resurs_id: String = "resurs_id",
    }
}

wire_record! {
    pub struct KlarnaTransaction: response "klarna_transaction" extends common: TransactionCommon {
        optional klarna_order_id: String = "klarna_order_id",
        optional payment_method_category: String = "payment_method_category",
    }
}

wire_record! {
    pub struct PaypalTransaction: response "paypal_transaction" extends common: TransactionCommon {
        optional paypal_capture_id: String = "paypal_capture_id",
        optional paypal_authorization_id: String = "paypal_authorization_id",
    }
}

wire_record! {
    pub struct OfflineTransaction: response "offline_transaction"
        extends common: TransactionCommon {
        optional offline_mandate: WireMap = "offline_mandate",
        optional offline_agreement_handle: String = "offline_agreement_handle",
        required offline_payment_instructions: String = "offline_payment_instructions",
    }
}

wire_record! {
    pub struct MybankTransaction: response "mybank_transaction" extends common: TransactionCommon {
        optional mybank_id: String = "mybank_id",
    }
}

wire_record! {
    pub struct BancomatpayTransaction: response "bancomatpay_transaction"
        extends common: TransactionCommon {
        optional bancomatpay_id: String = "bancomatpay_id",
    }
}

wire_record! {
    pub struct WechatpayTransaction: response "wechatpay_transaction"
        extends common: TransactionCommon {
        optional wechatpay_id: String = "wechatpay_id",
    }
}

wire_record! {
    pub struct AlipayTransaction: response "alipay_transaction" extends common: TransactionCommon {
        optional alipay_id: String = "alipay_id",
    }
}

wire_record! {
    pub struct BlikTransaction: response "blik_transaction" extends common: TransactionCommon {
        optional blik_id: String = "blik_id",
    }
}

wire_record! {
    pub struct IdealTransaction: response "ideal_transaction" extends common: TransactionCommon {
        optional ideal_id: String = "ideal_id",
    }
}

wire_record! {
    pub struct P24Transaction: response "p24_transaction" extends common: TransactionCommon {
        optional p24_id: String = "p24_id",
    }
}

wire_record! {
    pub struct SepaTransaction: response "sepa_transaction" extends common: TransactionCommon {
        optional sepa_id: String = "sepa_id",
        optional mandate_reference: String = "mandate_reference",
    }
}

wire_family! {
    /// Payment-method specific part of a transaction, selected by `payment_type`.
    pub enum TransactionDetails: "transaction" by "payment_type" {
        Card(CardTransaction) for "card", "applepay", "googlepay";
        MobilePaySubscriptions(MpsTransaction) for "mobilepay_subscriptions";
        Vipps(VippsTransaction) for "vipps", "vipps_recurring";
        Swish(SwishTransaction) for "swish";
        Viabill(ViabillTransaction) for "viabill";
        Manual(ManualTransaction) for "manual";
        Anyday(AnydayTransaction) for "anyday";
        Resurs(ResursTransaction) for "resurs";
        Klarna(KlarnaTransaction) for
            "klarna_pay_later",
            "klarna_pay_now",
            "klarna_slice_it",
            "klarna_direct_bank_transfer",
            "klarna_direct_debit";
        Paypal(PaypalTransaction) for "paypal";
        Offline(OfflineTransaction) for "offline";
        Mybank(MybankTransaction) for "mybank";
        Bancomatpay(BancomatpayTransaction) for "bancomatpay";
        Wechatpay(WechatpayTransaction) for "wechatpay";
        Alipay(AlipayTransaction) for "alipay";
        Blik(BlikTransaction) for "blik";
        Ideal(IdealTransaction) for "ideal";
        P24(P24Transaction) for "p24";
        Sepa(SepaTransaction) for "sepa";
        _ => Other(TransactionCommon);
    }
}

impl TransactionDetails {
    pub fn common(&self) -> &TransactionCommon {
        match self {
            Self::Card(details) => &details.common,
            Self::MobilePaySubscriptions(details) => &details.common,
            Self::Vipps(details) => &details.common,
            Self::Swish(details) => &details.common,
            Self::Viabill(details) => &details.common,
            Self::Manual(details) => &details.common,
            Self::Anyday(details) => &details.common,
            Self::Resurs(details) => &details.common,
            Self::Klarna(details) => &details.common,
            Self::Paypal(details) => &details.common,
            Self::Offline(details) => &details.common,
            Self::Mybank(details) => &details.common,
            Self::Bancomatpay(details) => &details.common,
            Self::Wechatpay(details) => &details.common,
            Self::Alipay(details) => &details.common,
            Self::Blik(details) => &details.common,
            Self::Ideal(details) => &details.common,
            Self::P24(details) => &details.common,
            Self::Sepa(details) => &details.common,
            Self::Other(common) => common,
        }
    }
}

wire_record! {
    pub struct Transaction: response "transaction" {
        required id: String = "id",
        required_enum state: TransactionState = "state",
        required invoice: String = "invoice",
        required_enum transaction_type: TransactionType = "type",
        required amount: i64 = "amount",
        required currency: String = "currency",
        required created: DateTime<Utc> = "created",
        optional settled: DateTime<Utc> = "settled",
        optional authorized: DateTime<Utc> = "authorized",
        optional failed: DateTime<Utc> = "failed",
        optional refunded: DateTime<Utc> = "refunded",
        optional ref_transaction: String = "ref_transaction",
        /// Kept as sent, so new payment methods are still visible
        optional payment_type: String = "payment_type",
        optional details: TransactionDetails = "details",
    }
}

// Requests

#[derive(Debug, Clone)]
pub struct GetTransaction {
    invoice: String,
    transaction: String,
}

impl GetTransaction {
    pub fn new(invoice: impl Into<String>, transaction: impl Into<String>) -> Self {
        Self {
            invoice: invoice.into(),
            transaction: transaction.into(),
        }
    }
}

impl Endpoint for GetTransaction {
    type Response = Transaction;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/invoice/{}/transaction/{}", self.invoice, self.transaction).into()
    }
}

pub(crate) fn register(builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
    builder
        .model::<TransactionCommon>()?
        .model::<CardTransaction>()?
        .model::<MpsTransaction>()?
        .model::<VippsTransaction>()?
        .model::<SwishTransaction>()?
        .model::<ViabillTransaction>()?
        .model::<ManualTransaction>()?
        .model::<AnydayTransaction>()?
        .model::<ResursTransaction>()?
        .model::<KlarnaTransaction>()?
        .model::<PaypalTransaction>()?
        .model::<OfflineTransaction>()?
        .model::<MybankTransaction>()?
        .model::<BancomatpayTransaction>()?
        .model::<WechatpayTransaction>()?
        .model::<AlipayTransaction>()?
        .model::<BlikTransaction>()?
        .model::<IdealTransaction>()?
        .model::<P24Transaction>()?
        .model::<SepaTransaction>()?
        .model::<Transaction>()?
        .family(TransactionDetails::family())?;
    Ok(())
}
