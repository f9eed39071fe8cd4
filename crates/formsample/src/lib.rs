// FormSample - form handling and suspense-style fetching with Maud templates
// Two demo pages: a cached remote fetch and a manual vs. schema-validated form

pub mod config;
pub mod fetch;
pub mod forms;
pub mod pages;
pub mod request_context;
pub mod routes;

// Re-export framework types
pub use config::Config;
pub use fetch::{FetchError, FetchState, Fetcher, JsonFetcher, Post, ResourceCache};
pub use forms::{
    sample_schema, ErrorMap, Field, FieldValue, FormEvent, FormValues, GenderCode, ManualForm,
    Rule, SubmitOutcome, ValidatedForm, ValidationMode, ValidationSchema,
};
pub use request_context::{FormData, QueryParams, RequestContext};
pub use routes::PageRoute;

// Re-export Maud for templates
pub use maud::{html as maud, Markup, PreEscaped, DOCTYPE};
