//! 公开页面布局：导航栏 + 内容 + 页脚

use leptos::prelude::*;

use crate::components::icons::{Close, Github, Mail, Menu};
use crate::content::{NAV_LINKS, OWNER, SOCIAL_LINKS};
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn PublicLayout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col bg-base-200">
            <Navbar />
            <main class="flex-1">{children()}</main>
            <Footer />
        </div>
    }
}

#[component]
fn Navbar() -> impl IntoView {
    let (menu_open, set_menu_open) = signal(false);
    let close_menu = Callback::new(move |_: ()| set_menu_open.set(false));

    let nav_items = move || {
        NAV_LINKS
            .iter()
            .map(|(route, label)| {
                view! {
                    <li>
                        <Link to=*route active_class="active" on_navigate=close_menu>
                            {*label}
                        </Link>
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <nav class="navbar bg-base-100 shadow-sm sticky top-0 z-40">
            <div class="container mx-auto flex flex-wrap items-center">
                <div class="flex-1">
                    <Link to=AppRoute::Home class="btn btn-ghost text-xl">
                        {OWNER.name}<span class="text-primary">"."</span>
                    </Link>
                </div>

                <button
                    class="btn btn-ghost btn-square md:hidden"
                    aria-label="Toggle navigation menu"
                    aria-expanded=move || menu_open.get().to_string()
                    on:click=move |_| set_menu_open.update(|open| *open = !*open)
                >
                    {move || if menu_open.get() {
                        view! { <Close attr:class="h-6 w-6" /> }.into_any()
                    } else {
                        view! { <Menu attr:class="h-6 w-6" /> }.into_any()
                    }}
                </button>

                <ul class="menu menu-horizontal px-1 hidden md:flex">
                    {nav_items()}
                </ul>

                <Show when=move || menu_open.get()>
                    <ul class="menu w-full md:hidden">
                        {nav_items()}
                    </ul>
                </Show>
            </div>
        </nav>
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer class="footer footer-center p-8 bg-base-100 text-base-content">
            <div class="flex gap-4">
                <a href=SOCIAL_LINKS.github target="_blank" rel="noopener noreferrer" class="btn btn-ghost btn-circle" aria-label="GitHub">
                    <Github attr:class="h-5 w-5" />
                </a>
                <a href=SOCIAL_LINKS.linkedin target="_blank" rel="noopener noreferrer" class="btn btn-ghost btn-sm">
                    "LinkedIn"
                </a>
                <a href=SOCIAL_LINKS.email class="btn btn-ghost btn-circle" aria-label="Email">
                    <Mail attr:class="h-5 w-5" />
                </a>
            </div>
            <p class="text-sm text-base-content/60">
                {format!("© {} · {}", OWNER.name, OWNER.tagline)}
            </p>
            <Link to=AppRoute::AdminLogin class="link link-hover text-xs text-base-content/40">
                "Admin"
            </Link>
        </footer>
    }
}
