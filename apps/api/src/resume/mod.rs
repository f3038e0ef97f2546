// Resume upload pipeline: validate, extract, classify, store.

pub mod handlers;
