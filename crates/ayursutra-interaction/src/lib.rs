//! HTTP interaction layer for the clinic backend.

pub mod http_clinic_api;

pub use http_clinic_api::HttpClinicApi;
