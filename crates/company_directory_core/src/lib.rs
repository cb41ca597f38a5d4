pub mod domain;
pub mod ports;

pub use domain::{
    BusinessHour, Company, CompanyData, CompanyPatch, DEFAULT_RESET_PASSWORD,
    DEFAULT_RESPONSE_TIME,
};
pub use ports::{CompanyStore, PortError, PortResult};
