//! 通用展示组件

use leptos::prelude::*;

use crate::components::icons::AlertCircle;
use crate::error::DEFAULT_SERVER_MESSAGE;

/// 加载指示器
#[component]
pub fn Loading(
    #[prop(optional, into)] message: Option<String>,
    /// 占满整个视口（路由守卫等待会话校验时使用）
    #[prop(optional)]
    full_screen: bool,
) -> impl IntoView {
    let container = if full_screen {
        "flex flex-col items-center justify-center min-h-screen gap-4 bg-base-200"
    } else {
        "flex flex-col items-center justify-center py-16 gap-4"
    };

    view! {
        <div class=container>
            <span class="loading loading-spinner loading-lg text-primary"></span>
            <p class="text-base-content/70">{message.unwrap_or_else(|| "Loading...".to_string())}</p>
        </div>
    }
}

/// 错误提示，可选的重试按钮
#[component]
pub fn ErrorMessage(
    #[prop(optional, into)] message: Option<String>,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    let message = message.unwrap_or_else(|| DEFAULT_SERVER_MESSAGE.to_string());

    view! {
        <div class="flex flex-col items-center text-center gap-3 py-12">
            <AlertCircle attr:class="h-12 w-12 text-error" />
            <h3 class="text-xl font-bold">"Oops!"</h3>
            <p class="text-base-content/70">{message}</p>
            {on_retry.map(|retry| view! {
                <button class="btn btn-outline btn-sm" on:click=move |_| retry.run(())>
                    "Try Again"
                </button>
            })}
        </div>
    }
}
