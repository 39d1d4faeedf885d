//! Property suites for the search pipeline and the client recovery policy.
