//! One route module per vendor. Each module validates inbound fields, picks
//! the connector operation, and mirrors the vendor outcome back.

pub mod asana;
pub mod clickup;
pub mod discord;
pub mod facebook;
pub mod instagram;
pub mod jira;
pub mod linkedin;
pub mod linkedin_sales;
pub mod monday;
pub mod notion;
pub mod salesforce;
pub mod slack;
pub mod teams;
pub mod whatsapp;
