use std::{
    fmt::{Debug, Display},
    pin::pin,
    sync::{Arc, Mutex},
};

use admin_shared::{
    const_config::client::CLIENT_DEFAULT_SERVER_ADDRESS,
    envelope::{Envelope, EnvelopeOutcome, TableData},
    token::AuthToken,
};
use futures::future::{select, Either};
use inflight_registry::{InFlightRegistry, RequestId};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{info, warn, Span};

use crate::{
    notify::{Notification, NotificationSink, TracingNotifier},
    RequestError, SessionStore,
};

pub mod api;

/// Used for requests that take no arguments. Serializes to an empty object
/// (or an empty query string)
#[derive(Debug, serde::Serialize, Clone, Copy)]
pub struct NoArgs {}

pub const NO_ARGS: NoArgs = NoArgs {};

#[derive(Debug, Clone)]
pub struct Client {
    api_client: reqwest::Client,
    session: SessionStore,
    in_flight: InFlightRegistry,
    notifier: Arc<dyn NotificationSink>,
    inner: Arc<Mutex<ClientInner>>,
}

#[derive(Debug)]
struct ClientInner {
    server_address: String,
}

/// Per call behaviour of [`Client::execute`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Suppresses every notification for the call (errors are still returned)
    pub silent: bool,
    /// Shown on success, nothing is shown on success if not set
    pub success_message: Option<String>,
    /// Replaces the message derived from the failure
    pub error_message: Option<String>,
}

/// Lifecycle of a single call. Recorded on the span of the call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Created,
    InFlight,
    Succeeded,
    Failed,
    Cancelled,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(
            CLIENT_DEFAULT_SERVER_ADDRESS.to_string(),
            SessionStore::in_memory(),
        )
    }
}

impl RequestOptions {
    pub fn silent() -> Self {
        Self {
            silent: true,
            ..Default::default()
        }
    }

    pub fn with_success_message<S: Into<String>>(mut self, message: S) -> Self {
        self.success_message = Some(message.into());
        self
    }

    pub fn with_error_message<S: Into<String>>(mut self, message: S) -> Self {
        self.error_message = Some(message.into());
        self
    }
}

impl RequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestState::Created => "created",
            RequestState::InFlight => "in_flight",
            RequestState::Succeeded => "succeeded",
            RequestState::Failed => "failed",
            RequestState::Cancelled => "cancelled",
        }
    }

    fn from_result<T>(result: &Result<T, RequestError>) -> Self {
        match result {
            Ok(_) => Self::Succeeded,
            Err(RequestError::Cancelled) => Self::Cancelled,
            Err(_) => Self::Failed,
        }
    }

    /// Only in flight requests hold a slot in the registry
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Cancelled)
    }
}

impl Display for RequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Client {
    #[tracing::instrument(name = "NEW CLIENT-CORE")]
    pub fn new(server_address: String, session: SessionStore) -> Self {
        let api_client = reqwest::Client::builder()
            .build()
            .expect("Unable to create reqwest client");
        Self {
            api_client,
            session,
            in_flight: InFlightRegistry::new(),
            notifier: Arc::new(TracingNotifier),
            inner: Arc::new(Mutex::new(ClientInner { server_address })),
        }
    }

    /// Replaces the sink user facing messages are sent to
    pub fn with_notifier<N: NotificationSink>(mut self, notifier: N) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn in_flight(&self) -> &InFlightRegistry {
        &self.in_flight
    }

    pub fn server_address(&self) -> String {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .server_address
            .clone()
    }

    pub fn set_server_address(&self, server_address: String) {
        self.inner.lock().expect("mutex poisoned").server_address = server_address;
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_authenticated()
    }

    pub async fn get<T, U>(
        &self,
        path: &str,
        args: &T,
        options: &RequestOptions,
    ) -> Result<U, RequestError>
    where
        T: serde::Serialize + Debug + ?Sized,
        U: DeserializeOwned,
    {
        self.execute(Method::GET, path, args, options).await
    }

    pub async fn post<T, U>(
        &self,
        path: &str,
        args: &T,
        options: &RequestOptions,
    ) -> Result<U, RequestError>
    where
        T: serde::Serialize + Debug + ?Sized,
        U: DeserializeOwned,
    {
        self.execute(Method::POST, path, args, options).await
    }

    pub async fn put<T, U>(
        &self,
        path: &str,
        args: &T,
        options: &RequestOptions,
    ) -> Result<U, RequestError>
    where
        T: serde::Serialize + Debug + ?Sized,
        U: DeserializeOwned,
    {
        self.execute(Method::PUT, path, args, options).await
    }

    pub async fn delete<T, U>(
        &self,
        path: &str,
        args: &T,
        options: &RequestOptions,
    ) -> Result<U, RequestError>
    where
        T: serde::Serialize + Debug + ?Sized,
        U: DeserializeOwned,
    {
        self.execute(Method::DELETE, path, args, options).await
    }

    /// Sends the request and returns the decoded `data` of the envelope
    pub async fn execute<T, U>(
        &self,
        method: Method,
        path: &str,
        args: &T,
        options: &RequestOptions,
    ) -> Result<U, RequestError>
    where
        T: serde::Serialize + Debug + ?Sized,
        U: DeserializeOwned,
    {
        self.run(method, path, args, options, |envelope: Envelope| {
            envelope.into_outcome::<U>()
        })
        .await
    }

    /// GET against a listing endpoint, adapted for table components
    pub async fn list<T, U>(
        &self,
        path: &str,
        args: &T,
        options: &RequestOptions,
    ) -> Result<TableData<U>, RequestError>
    where
        T: serde::Serialize + Debug + ?Sized,
        U: DeserializeOwned,
    {
        self.run(Method::GET, path, args, options, |envelope: Envelope| {
            envelope.into_table_outcome::<U>()
        })
        .await
    }

    #[tracing::instrument(
        skip(self, args, decode),
        fields(request_id = tracing::field::Empty, state = %RequestState::Created)
    )]
    // WARNING: Must skip args as it my contain sensitive info and "safe" versions
    // would usually already be logged by the caller
    async fn run<T, R, F>(
        &self,
        method: Method,
        path: &str,
        args: &T,
        options: &RequestOptions,
        decode: F,
    ) -> Result<R, RequestError>
    where
        T: serde::Serialize + Debug + ?Sized,
        F: FnOnce(Envelope) -> EnvelopeOutcome<R>,
    {
        let span = Span::current();
        let (request, sent_token) = self.build_request(method, path, args);
        let guard = self.in_flight.register();
        span.record("request_id", tracing::field::display(guard.id()));
        span.record("state", RequestState::InFlight.as_str());

        let response = {
            let cancelled = pin!(guard.cancelled());
            let transport = pin!(send(request));
            match select(cancelled, transport).await {
                Either::Left(((), _)) => None,
                Either::Right((response, _)) => Some(response),
            }
        };

        let mut result = match response {
            // Also covers a response that arrived after the session was swept
            _ if guard.is_cancelled() => Err(RequestError::Cancelled),
            None => Err(RequestError::Cancelled),
            Some(Err(e)) => Err(e),
            Some(Ok((status, body))) => interpret(status, &body, decode),
        };

        if result.as_ref().is_err_and(RequestError::is_auth_error) {
            self.expire_session(guard.id(), sent_token.as_ref());
            // Another 401 swept this call while it was being handled
            if guard.is_cancelled() {
                result = Err(RequestError::Cancelled);
            }
        }
        drop(guard);

        let state = RequestState::from_result(&result);
        span.record("state", state.as_str());
        self.report(&result, options);
        result
    }

    /// Also returns the token the request carries, if any
    fn build_request<T>(
        &self,
        method: Method,
        path: &str,
        args: &T,
    ) -> (reqwest::RequestBuilder, Option<AuthToken>)
    where
        T: serde::Serialize + Debug + ?Sized,
    {
        let is_body_method = method == Method::POST || method == Method::PUT;
        let mut request = self.api_client.request(method, self.path_to_url(path));
        request = if is_body_method {
            request.json(args)
        } else {
            request.query(args)
        };
        let token = self.session.token();
        if let Some(token) = &token {
            request = request.header(reqwest::header::AUTHORIZATION, token.bearer_header_value());
        }
        (request, token)
    }

    /// Clears the session and cancels every other outstanding request, but
    /// only if the rejected token is still the current one. A login made
    /// while the request was in flight is left alone
    #[tracing::instrument(skip(self, sent_token))]
    fn expire_session(&self, own_id: RequestId, sent_token: Option<&AuthToken>) {
        let Some(token) = sent_token else {
            warn!("request without a token was rejected as unauthorized");
            return;
        };
        if self.session.clear_if_token(token) {
            let swept = self.in_flight.cancel_all_except(own_id);
            warn!(swept, "session expired");
        } else {
            info!("rejected token is no longer the current one, session kept");
        }
    }

    fn report<R>(&self, result: &Result<R, RequestError>, options: &RequestOptions) {
        if options.silent {
            return;
        }
        match result {
            Ok(_) => {
                if let Some(message) = &options.success_message {
                    self.notifier.notify(Notification::success(message.clone()));
                }
            }
            Err(RequestError::Cancelled) => {}
            Err(e @ RequestError::Unauthorized { .. }) => {
                self.notifier.notify(Notification::warning(e.user_message()));
            }
            Err(e) => {
                let message = options
                    .error_message
                    .clone()
                    .unwrap_or_else(|| e.user_message());
                self.notifier.notify(Notification::error(message));
            }
        }
    }

    #[tracing::instrument(ret)]
    fn path_to_url(&self, path: &str) -> String {
        format!(
            "{}{path}",
            &self
                .inner
                .lock()
                .expect("failed to unlock client mutex")
                .server_address
        )
    }
}

#[tracing::instrument(skip(request), err(Debug))]
async fn send(request: reqwest::RequestBuilder) -> Result<(StatusCode, String), RequestError> {
    let response = request.send().await.map_err(|e| {
        info!("Response is err: {e:#?}");
        RequestError::Transport(e.to_string())
    })?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| RequestError::Transport(format!("failed to read response body: {e}")))?;
    Ok((status, body))
}

fn interpret<R, F>(status: StatusCode, body: &str, decode: F) -> Result<R, RequestError>
where
    F: FnOnce(Envelope) -> EnvelopeOutcome<R>,
{
    if status == StatusCode::UNAUTHORIZED {
        return Err(RequestError::Unauthorized {
            message: server_message(status, body),
        });
    }
    if status.is_server_error() {
        return Err(RequestError::Server {
            status: status.as_u16(),
            message: server_message(status, body),
        });
    }
    if !status.is_success() {
        return Err(RequestError::Http {
            status: status.as_u16(),
            message: server_message(status, body),
        });
    }

    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| RequestError::Malformed(format!("body is not an envelope: {e}")))?;
    match decode(envelope) {
        EnvelopeOutcome::Success { data, .. } => Ok(data),
        EnvelopeOutcome::ApplicationError {
            code,
            message,
            data,
        } => Err(RequestError::Application {
            code,
            message,
            data,
        }),
        EnvelopeOutcome::Malformed(reason) => Err(RequestError::Malformed(reason)),
    }
}

/// Best message available for a failed response: the envelope's message,
/// then the raw body, then the status text
fn server_message(status: StatusCode, body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<Envelope>(body) {
        if !envelope.message.is_empty() {
            return envelope.message;
        }
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    status
        .canonical_reason()
        .map(ToString::to_string)
        .unwrap_or_else(|| status.to_string())
}
