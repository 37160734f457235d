//! # Mock Workflows
//!
//! [`MockWorkflow`] answers verb hooks from a queue of expectations instead of real
//! logic, so routing, dispatch and rendering can be tested without writing a workflow
//! per case. It is `Clone`; every clone shares the same queue and call log.
//!
//! | outcome | builder call | dispatch result |
//! |---------|--------------|-----------------|
//! | response | `return_ok` | the response |
//! | error | `return_err` | 404 / 405 / 500 per error |
//! | panic | `panic_with` | 500 with the panic message |
//! | nothing queued | | 405 |
//!
//! ```rust
//! use painless::mock::MockWorkflow;
//! use painless::{App, Response};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockWorkflow::new();
//!     mock.expect_get().return_ok(Response::ok(json!("listed")));
//!     mock.expect_post().return_err("disk full");
//!
//!     let app = App::builder("acme")
//!         .workflow("blog", "post", { let m = mock.clone(); move || m.clone() })
//!         .build()
//!         .unwrap();
//!
//!     assert_eq!(app.call("blog/post").await.status, 200);
//!     assert_eq!(app.call("POST blog/post").await.status, 500);
//!     assert_eq!(app.call("DELETE blog/post").await.status, 405);
//!     mock.verify();
//!     assert_eq!(mock.calls().len(), 3);
//! }
//! ```

use crate::request::{Method, Request};
use crate::response::Response;
use crate::workflow::{Workflow, WorkflowError, WorkflowResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

enum Outcome {
    Respond(Response),
    Fail(WorkflowError),
    Panic(String),
}

struct Expectation {
    method: Method,
    outcome: Outcome,
}

type Queue = Arc<Mutex<VecDeque<Expectation>>>;

/// A workflow scripted by expectations.
#[derive(Clone, Default)]
pub struct MockWorkflow {
    expectations: Queue,
    calls: Arc<Mutex<Vec<Request>>>,
}

macro_rules! expect_verbs {
    ($($verb:ident => $method:expr),* $(,)?) => {
        paste::paste! {
            impl MockWorkflow {
                $(
                    #[doc = "Queues the answer to the next `" $verb "` call."]
                    pub fn [<expect_ $verb>](&self) -> ExpectationBuilder {
                        self.expect($method)
                    }
                )*
            }
        }
    };
}

expect_verbs!(
    get => Method::Get,
    post => Method::Post,
    put => Method::Put,
    delete => Method::Delete,
    options => Method::Options,
);

impl MockWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the answer to the next call with `method`.
    pub fn expect(&self, method: Method) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            expectations: self.expectations.clone(),
        }
    }

    /// Every request the mock received, in order.
    pub fn calls(&self) -> Vec<Request> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Panics unless every queued expectation was consumed.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn answer(&self, method: Method, request: &Request) -> WorkflowResult {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let next = {
            let mut queue = self
                .expectations
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            match queue.front().map(|e| e.method) {
                Some(expected) if expected == method => queue.pop_front(),
                Some(expected) => panic!("Unexpected {method} call, expected {expected}"),
                None => None,
            }
        };

        match next.map(|e| e.outcome) {
            Some(Outcome::Respond(response)) => Ok(response),
            Some(Outcome::Fail(error)) => Err(error),
            Some(Outcome::Panic(message)) => panic!("{message}"),
            None => Err(WorkflowError::MethodNotSupported(method)),
        }
    }
}

#[async_trait]
impl Workflow for MockWorkflow {
    async fn get(&self, request: &Request) -> WorkflowResult {
        self.answer(Method::Get, request)
    }

    async fn post(&self, request: &Request) -> WorkflowResult {
        self.answer(Method::Post, request)
    }

    async fn put(&self, request: &Request) -> WorkflowResult {
        self.answer(Method::Put, request)
    }

    async fn delete(&self, request: &Request) -> WorkflowResult {
        self.answer(Method::Delete, request)
    }

    async fn options(&self, request: &Request) -> WorkflowResult {
        self.answer(Method::Options, request)
    }
}

/// Sets the outcome of one expected call.
pub struct ExpectationBuilder {
    method: Method,
    expectations: Queue,
}

impl ExpectationBuilder {
    pub fn return_ok(self, response: Response) {
        self.push(Outcome::Respond(response));
    }

    pub fn return_err(self, error: impl Into<WorkflowError>) {
        self.push(Outcome::Fail(error.into()));
    }

    /// Makes the hook panic with `message`.
    pub fn panic_with(self, message: impl Into<String>) {
        self.push(Outcome::Panic(message.into()));
    }

    fn push(self, outcome: Outcome) {
        self.expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Expectation {
                method: self.method,
                outcome,
            });
    }
}
