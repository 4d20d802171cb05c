//! 通用数据请求
//!
//! `Fetcher` 是与界面无关的核心：发起请求、维护 `FetchState`，
//! 并用请求代数丢弃过期结果。`use_fetch` 把它绑定到 Leptos 信号上。

use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use folio_shared::protocol::HttpMethod;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;

use crate::config;
use crate::error::ApiError;
use crate::state::StateCell;
use crate::web::{FetchTransport, HttpClient, HttpTransport};

/// 错误消息为空时使用的提示
pub const FETCH_FALLBACK_MESSAGE: &str = "An error occurred while fetching data";

/// 单个请求的加载状态
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> FetchState<T> {
    /// 请求开始：保留旧数据
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// 请求结束：成功替换数据并清除错误，失败只记录错误
    pub fn settle(&mut self, result: Result<T, String>) {
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(message) if message.is_empty() => {
                self.error = Some(FETCH_FALLBACK_MESSAGE.to_string());
            }
            Err(message) => self.error = Some(message),
        }
        self.loading = false;
    }
}

/// 构造选项
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions {
    /// 构造后立即请求
    pub immediate: bool,
    pub method: HttpMethod,
    /// 附加到每次请求的 bearer token
    pub bearer: Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            immediate: true,
            method: HttpMethod::Get,
            bearer: None,
        }
    }
}

impl FetchOptions {
    pub fn authenticated(token: impl Into<String>) -> Self {
        Self {
            bearer: Some(token.into()),
            ..Self::default()
        }
    }
}

/// 单次调用时覆盖的选项
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: Option<HttpMethod>,
    pub body: Option<String>,
}

/// 请求代数与生命周期标记
///
/// 只有最新一次请求的结果会被写回；所有者销毁后不再写回任何结果。
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    latest: Arc<AtomicU64>,
    disposed: Arc<AtomicBool>,
}

impl RequestTracker {
    fn next(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        !self.disposed.load(Ordering::SeqCst) && self.latest.load(Ordering::SeqCst) == generation
    }

    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }
}

pub struct Fetcher<T, C, X = FetchTransport> {
    cell: C,
    client: Rc<HttpClient<X>>,
    locator: Option<String>,
    options: FetchOptions,
    tracker: RequestTracker,
    _marker: PhantomData<fn() -> T>,
}

impl<T, C: Clone, X> Clone for Fetcher<T, C, X> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            client: Rc::clone(&self.client),
            locator: self.locator.clone(),
            options: self.options.clone(),
            tracker: self.tracker.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, C, X> Fetcher<T, C, X>
where
    T: DeserializeOwned + Clone,
    C: StateCell<FetchState<T>>,
    X: HttpTransport,
{
    pub fn new(
        cell: C,
        client: Rc<HttpClient<X>>,
        locator: Option<String>,
        options: FetchOptions,
    ) -> Self {
        Self {
            cell,
            client,
            locator,
            options,
            tracker: RequestTracker::default(),
            _marker: PhantomData,
        }
    }

    pub fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }

    /// 是否应在构造后自动发起请求
    pub fn should_start(&self) -> bool {
        self.options.immediate && self.locator.is_some()
    }

    /// 需要自动请求时立即进入加载状态，使首帧就显示加载提示而不是空列表
    pub fn begin_initial(&self) -> bool {
        let starts = self.should_start();
        if starts {
            self.cell.modify(&mut |state| state.begin());
        }
        starts
    }

    /// 执行构造时的自动请求；失败只记录到状态中
    pub async fn start(&self) {
        if self.should_start() {
            let _ = self.fetch_data(None, RequestOptions::default()).await;
        }
    }

    /// 发起请求
    ///
    /// `locator` 为空时使用构造时的地址。结果原样返回给调用方；
    /// 只有当它仍是最新的请求时才写回状态。
    pub async fn fetch_data(
        &self,
        locator: Option<&str>,
        overrides: RequestOptions,
    ) -> Result<T, ApiError> {
        let Some(path) = locator.map(str::to_string).or_else(|| self.locator.clone()) else {
            return Err(ApiError::Unexpected("缺少请求地址".to_string()));
        };

        let generation = self.tracker.next();
        self.cell.modify(&mut |state| state.begin());

        let method = overrides.method.unwrap_or(self.options.method);
        let result = self
            .client
            .fetch_json::<T>(method, &path, self.options.bearer.as_deref(), overrides.body)
            .await;

        if self.tracker.is_current(generation) {
            let mut outcome = Some(result.clone().map_err(|e| e.message()));
            self.cell.modify(&mut |state| {
                if let Some(outcome) = outcome.take() {
                    state.settle(outcome);
                }
            });
        } else {
            log::debug!("[Fetch] discarded stale response for {}", path);
        }

        result
    }

    pub async fn refetch(&self) -> Result<T, ApiError> {
        self.fetch_data(None, RequestOptions::default()).await
    }
}

// =========================================================
// Leptos 绑定
// =========================================================

/// 视图使用的请求句柄
pub struct FetchHandle<T: Send + Sync + 'static> {
    state: RwSignal<FetchState<T>>,
    fetcher: StoredValue<Fetcher<T, RwSignal<FetchState<T>>>, LocalStorage>,
}

impl<T: Send + Sync + 'static> Clone for FetchHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for FetchHandle<T> {}

impl<T> FetchHandle<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    pub fn data(&self) -> Signal<Option<T>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.data.clone()))
    }

    pub fn loading(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.loading))
    }

    pub fn error(&self) -> Signal<Option<String>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.error.clone()))
    }

    /// 用构造时的地址重新请求
    pub fn refetch(&self) {
        let Some(fetcher) = self.fetcher.try_get_value() else {
            return;
        };
        spawn_local(async move {
            let _ = fetcher.refetch().await;
        });
    }

    /// 以新的地址或选项请求，并等待结果
    pub async fn fetch_data(
        &self,
        locator: Option<String>,
        overrides: RequestOptions,
    ) -> Result<T, ApiError> {
        let fetcher = self
            .fetcher
            .try_get_value()
            .ok_or_else(|| ApiError::Unexpected("请求句柄已销毁".to_string()))?;
        fetcher.fetch_data(locator.as_deref(), overrides).await
    }

    /// 以新的地址请求，不等待结果
    pub fn load(&self, locator: String) {
        let handle = *self;
        spawn_local(async move {
            let _ = handle
                .fetch_data(Some(locator), RequestOptions::default())
                .await;
        });
    }
}

/// 在当前组件中创建请求，组件销毁后迟到的结果会被丢弃
pub fn use_fetch<T>(locator: Option<String>, options: FetchOptions) -> FetchHandle<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    let state = RwSignal::new(FetchState::default());
    let client = HttpClient::new(config::API_BASE_URL, FetchTransport::default());
    let fetcher = Fetcher::new(state, Rc::new(client), locator, options);

    let tracker = fetcher.tracker().clone();
    on_cleanup(move || tracker.dispose());

    if fetcher.begin_initial() {
        let initial = fetcher.clone();
        spawn_local(async move { initial.start().await });
    }

    FetchHandle {
        state,
        fetcher: StoredValue::new_local(fetcher),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::{HttpError, HttpRequest, HttpResponse};
    use crate::web::tests::MockTransport;
    use folio_shared::protocol::{ApiRequest, ListMessagesRequest};
    use serde_json::json;
    use std::cell::RefCell;

    const BASE: &str = "http://api.test";

    type Cell = Rc<RefCell<FetchState<serde_json::Value>>>;

    impl FetchOptions {
        fn lazy(mut self) -> Self {
            self.immediate = false;
            self
        }
    }

    fn fetcher(
        transport: MockTransport,
        locator: Option<&str>,
        options: FetchOptions,
    ) -> (Fetcher<serde_json::Value, Cell, MockTransport>, Cell) {
        let cell: Cell = Rc::new(RefCell::new(FetchState::default()));
        let client = Rc::new(HttpClient::new(BASE, transport));
        let fetcher = Fetcher::new(cell.clone(), client, locator.map(str::to_string), options);
        (fetcher, cell)
    }

    #[test]
    fn test_settle_with_empty_message_uses_fallback() {
        let mut state: FetchState<u32> = FetchState::default();
        state.begin();
        state.settle(Err(String::new()));
        assert_eq!(state.error.as_deref(), Some(FETCH_FALLBACK_MESSAGE));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_immediate_fetch_stores_body() {
        let transport = MockTransport::new();
        transport.respond(HttpMethod::Get, "http://api.test/api/projects", 200, json!({"data": {"projects": []}}));
        let (fetcher, cell) = fetcher(transport, Some("/api/projects"), FetchOptions::default());

        assert!(fetcher.should_start());
        fetcher.start().await;

        let state = cell.borrow().clone();
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.data, Some(json!({"data": {"projects": []}})));
    }

    #[test]
    fn test_immediate_fetcher_is_loading_before_request_is_sent() {
        let locator = ListMessagesRequest { unread_only: false }.path();
        let (immediate, cell) = fetcher(
            MockTransport::new(),
            Some(&locator),
            FetchOptions::authenticated("tok"),
        );

        assert!(immediate.begin_initial());
        assert!(cell.borrow().loading);
        assert!(immediate.client.transport().requests.borrow().is_empty());

        let (idle, idle_cell) = fetcher(
            MockTransport::new(),
            Some(&locator),
            FetchOptions::authenticated("tok").lazy(),
        );
        assert!(!idle.begin_initial());
        assert!(!idle_cell.borrow().loading);
    }

    #[tokio::test]
    async fn test_lazy_fetcher_stays_idle() {
        let (fetcher, cell) = fetcher(MockTransport::new(), Some("/api/projects"), FetchOptions::default().lazy());

        assert!(!fetcher.should_start());
        fetcher.start().await;

        assert_eq!(*cell.borrow(), FetchState::default());
        assert!(fetcher.client.transport().requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_no_locator_means_idle() {
        let (fetcher, cell) = fetcher(MockTransport::new(), None, FetchOptions::default());
        assert!(!fetcher.should_start());
        assert!(!cell.borrow().loading);

        let err = fetcher.refetch().await.unwrap_err();
        assert!(matches!(err, ApiError::Unexpected(_)));
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_data() {
        let transport = MockTransport::new();
        transport.respond(HttpMethod::Get, "http://api.test/admin/projects", 200, json!({"n": 1}));
        transport.respond(HttpMethod::Get, "http://api.test/admin/projects", 500, json!({"message": "Database down"}));
        let (fetcher, cell) = fetcher(transport, Some("/admin/projects"), FetchOptions::authenticated("t"));

        fetcher.refetch().await.unwrap();
        let err = fetcher.refetch().await.unwrap_err();
        assert_eq!(err.status(), Some(500));

        let state = cell.borrow().clone();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Database down"));
        assert_eq!(state.data, Some(json!({"n": 1})));
    }

    #[tokio::test]
    async fn test_transport_failure_sets_error_string() {
        let transport = MockTransport::new();
        transport.fail(HttpMethod::Get, "http://api.test/api/projects", HttpError::NetworkError("timeout".into()));
        let (fetcher, cell) = fetcher(transport, Some("/api/projects"), FetchOptions::default());

        assert_eq!(fetcher.refetch().await, Err(ApiError::Transport));
        let state = cell.borrow().clone();
        assert!(!state.loading);
        assert!(state.error.is_some());
        assert_eq!(state.data, None);
    }

    #[tokio::test]
    async fn test_overrides_and_bearer_are_used() {
        let transport = MockTransport::new();
        transport.respond(HttpMethod::Put, "http://api.test/admin/messages/3/read", 200, json!({"success": true}));
        let (fetcher, _cell) = fetcher(transport, None, FetchOptions::authenticated("tok").lazy());

        let overrides = RequestOptions {
            method: Some(HttpMethod::Put),
            body: Some("{}".into()),
        };
        fetcher.fetch_data(Some("/admin/messages/3/read"), overrides).await.unwrap();

        let req = fetcher.client.transport().last_request().unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.body.as_deref(), Some("{}"));
        assert_eq!(req.header_value("Authorization"), Some("Bearer tok"));
    }

    /// 在请求途中模拟另一个更新的请求已经发出
    struct SupersedingTransport {
        inner: MockTransport,
        tracker: RefCell<Option<RequestTracker>>,
    }

    #[async_trait::async_trait(?Send)]
    impl HttpTransport for SupersedingTransport {
        async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
            if let Some(tracker) = self.tracker.borrow().as_ref() {
                tracker.next();
            }
            self.inner.send(req).await
        }
    }

    #[tokio::test]
    async fn test_superseded_result_is_discarded() {
        let inner = MockTransport::new();
        inner.respond(HttpMethod::Get, "http://api.test/a", 200, json!("old"));
        let transport = SupersedingTransport {
            inner,
            tracker: RefCell::new(None),
        };
        let cell: Cell = Rc::new(RefCell::new(FetchState::default()));
        let client = Rc::new(HttpClient::new(BASE, transport));
        let fetcher = Fetcher::new(cell.clone(), client, Some("/a".into()), FetchOptions::default());
        *fetcher.client.transport().tracker.borrow_mut() = Some(fetcher.tracker().clone());

        let result = fetcher.refetch().await.unwrap();
        assert_eq!(result, json!("old"));

        // 更新的请求仍在进行中：不写回数据，也不结束加载状态
        let state = cell.borrow().clone();
        assert_eq!(state.data, None);
        assert!(state.loading);
    }

    #[tokio::test]
    async fn test_disposed_fetcher_does_not_write_back() {
        let transport = MockTransport::new();
        transport.respond(HttpMethod::Get, "http://api.test/a", 200, json!("late"));
        let (fetcher, cell) = fetcher(transport, Some("/a"), FetchOptions::default());

        fetcher.tracker().dispose();
        let result = fetcher.refetch().await.unwrap();

        assert_eq!(result, json!("late"));
        let state = cell.borrow().clone();
        assert_eq!(state.data, None);
        // 已开始的加载状态不会被清除，所有者已不再渲染
        assert!(state.loading);
    }
}
