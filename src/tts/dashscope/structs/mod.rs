pub mod synthesis_input;
pub mod synthesize_request;
pub mod synthesize_response;
