mod bugzilla_rest_client;

pub use bugzilla_rest_client::BugzillaRestClient;
