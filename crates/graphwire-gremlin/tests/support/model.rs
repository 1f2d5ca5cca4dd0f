//! Sample vertex models used by the integration tests.

use std::sync::OnceLock;

use graphwire_core::{Vertex, VertexId, VertexModel, VertexSchema};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub vertex: Vertex,
    pub balance: f64,
    pub last_payment_date: String,
    pub last_payment_amount: f64,
    pub display_name: String,
    pub salutation: String,
    pub email: String,
    pub mobile_phone: Option<String>,
    pub monthly_payment: f64,
}

impl Default for User {
    fn default() -> Self {
        Self {
            vertex: Vertex::new(Self::LABEL),
            balance: 0.0,
            last_payment_date: String::new(),
            last_payment_amount: 0.0,
            display_name: String::new(),
            salutation: String::new(),
            email: String::new(),
            mobile_phone: None,
            monthly_payment: 0.0,
        }
    }
}

impl User {
    pub fn id(&self) -> &str {
        self.vertex.id().map(VertexId::as_str).unwrap_or_default()
    }
}

impl VertexModel for User {
    const LABEL: &'static str = "user";

    fn vertex(&self) -> &Vertex {
        &self.vertex
    }

    fn vertex_mut(&mut self) -> &mut Vertex {
        &mut self.vertex
    }

    fn schema() -> &'static VertexSchema<Self> {
        static SCHEMA: OnceLock<VertexSchema<User>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            VertexSchema::new()
                .field("balance", |u: &User| u.balance, |u, v| u.balance = v)
                .field("lastPaymentDate", |u: &User| u.last_payment_date.clone(), |u, v| {
                    u.last_payment_date = v
                })
                .field("lastPaymentAmount", |u: &User| u.last_payment_amount, |u, v| {
                    u.last_payment_amount = v
                })
                .field("displayName", |u: &User| u.display_name.clone(), |u, v| u.display_name = v)
                .field("salutation", |u: &User| u.salutation.clone(), |u, v| u.salutation = v)
                .field("email", |u: &User| u.email.clone(), |u, v| u.email = v)
                .field("mobilePhone", |u: &User| u.mobile_phone.clone(), |u, v| u.mobile_phone = v)
                .field("monthlyPayment", |u: &User| u.monthly_payment, |u, v| u.monthly_payment = v)
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bill {
    pub vertex: Vertex,
    pub amount: f64,
    pub due_date: String,
    pub display_name: String,
    pub payment_requested: bool,
    pub payor_email: String,
}

impl Default for Bill {
    fn default() -> Self {
        Self {
            vertex: Vertex::new(Self::LABEL),
            amount: 0.0,
            due_date: String::new(),
            display_name: String::new(),
            payment_requested: false,
            payor_email: String::new(),
        }
    }
}

impl VertexModel for Bill {
    const LABEL: &'static str = "bill";

    fn vertex(&self) -> &Vertex {
        &self.vertex
    }

    fn vertex_mut(&mut self) -> &mut Vertex {
        &mut self.vertex
    }

    fn schema() -> &'static VertexSchema<Self> {
        static SCHEMA: OnceLock<VertexSchema<Bill>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            VertexSchema::new()
                .field("amount", |b: &Bill| b.amount, |b, v| b.amount = v)
                .field("dueDate", |b: &Bill| b.due_date.clone(), |b, v| b.due_date = v)
                .field("displayName", |b: &Bill| b.display_name.clone(), |b, v| b.display_name = v)
                .field("paymentRequested", |b: &Bill| b.payment_requested, |b, v| {
                    b.payment_requested = v
                })
                .field("payorEmail", |b: &Bill| b.payor_email.clone(), |b, v| b.payor_email = v)
        })
    }
}

/// A user with the balances the scenarios start from.
pub fn test_user() -> User {
    let tag = VertexId::generate();
    User {
        balance: 185.0,
        last_payment_date: "12/01/2017".to_string(),
        last_payment_amount: 70.0,
        display_name: "Test User One".to_string(),
        salutation: "Test User".to_string(),
        email: format!("test+{tag}@example.com"),
        mobile_phone: Some("+15555550100".to_string()),
        monthly_payment: 100.0,
        ..User::default()
    }
}

pub fn test_bill() -> Bill {
    Bill {
        amount: 42.5,
        due_date: "2018-01-15".to_string(),
        display_name: "Electricity".to_string(),
        payment_requested: true,
        payor_email: "payor@example.com".to_string(),
        ..Bill::default()
    }
}
