use crate::endpoints::{
    accounts::GetAccount,
    agreements::GetAgreement,
    charges::{CancelCharge, CreateCharge, GetCharge, SettleCharge},
    invoices::{GetInvoice, InvoiceQuery, ListInvoices},
    payment_methods::{GetPaymentMethod, ListPaymentMethods, PaymentMethodQuery},
    refunds::{CreateRefund, GetRefund},
    transactions::GetTransaction,
    webhooks::{GetWebhookSettings, UpdateWebhookSettings},
};

pub struct AccountRepository;

impl AccountRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn get(&self) -> GetAccount {
        GetAccount
    }
}

pub struct AgreementRepository;

impl AgreementRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn get(&self, id: impl Into<String>) -> GetAgreement {
        GetAgreement::new(id)
    }
}

pub struct ChargeRepository;

impl ChargeRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn create(&self, handle: impl Into<String>, source: impl Into<String>) -> CreateCharge {
        CreateCharge::new(handle, source)
    }

    pub fn get(&self, handle: impl Into<String>) -> GetCharge {
        GetCharge::new(handle)
    }

    pub fn settle(&self, handle: impl Into<String>) -> SettleCharge {
        SettleCharge::new(handle)
    }

    pub fn cancel(&self, handle: impl Into<String>) -> CancelCharge {
        CancelCharge::new(handle)
    }
}

pub struct InvoiceRepository;

impl InvoiceRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn get(&self, id: impl Into<String>) -> GetInvoice {
        GetInvoice::new(id)
    }

    pub fn list(&self) -> ListInvoices {
        ListInvoices::new()
    }

    pub fn list_with(&self, query: InvoiceQuery) -> ListInvoices {
        ListInvoices::new().query(query)
    }
}

pub struct PaymentMethodRepository;

impl PaymentMethodRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn get(&self, id: impl Into<String>) -> GetPaymentMethod {
        GetPaymentMethod::new(id)
    }

    pub fn list(&self) -> ListPaymentMethods {
        ListPaymentMethods::new()
    }

    pub fn list_with(&self, query: PaymentMethodQuery) -> ListPaymentMethods {
        ListPaymentMethods::new().query(query)
    }
}

pub struct RefundRepository;

impl RefundRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn create(&self, invoice: impl Into<String>) -> CreateRefund {
        CreateRefund::new(invoice)
    }

    pub fn get(&self, id: impl Into<String>) -> GetRefund {
        GetRefund::new(id)
    }
}

pub struct TransactionRepository;

impl TransactionRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn get(
        &self,
        invoice: impl Into<String>,
        transaction: impl Into<String>,
    ) -> GetTransaction {
        GetTransaction::new(invoice, transaction)
    }
}

pub struct WebhookRepository;

impl WebhookRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn settings(&self) -> GetWebhookSettings {
        GetWebhookSettings
    }

    pub fn update_settings(&self, urls: Vec<String>) -> UpdateWebhookSettings {
        UpdateWebhookSettings::new(urls)
    }
}
