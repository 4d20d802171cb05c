use leptos::prelude::*;

use crate::components::icons::ArrowRight;
use crate::content::{OWNER, SKILLS};
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn HomePage() -> impl IntoView {
    let code = format!(
        r#"const engineer = {{
  name: "{}",
  role: "{}",
  focus: [
    "Backend Architecture",
    "Full-Stack Development",
    "Clean Code"
  ],
  passion: "Building robust systems"
}};"#,
        OWNER.name, OWNER.title
    );

    view! {
        <section class="hero min-h-[70vh]">
            <div class="hero-content flex-col lg:flex-row-reverse gap-12 max-w-6xl">
                <div class="mockup-code w-full lg:w-1/2 text-sm">
                    <pre class="px-6 whitespace-pre-wrap"><code>{code}</code></pre>
                </div>
                <div class="lg:w-1/2">
                    <p class="text-primary font-semibold">"Hello, I'm"</p>
                    <h1 class="text-5xl font-bold">{OWNER.name}</h1>
                    <h2 class="text-2xl mt-2 text-base-content/80">{OWNER.title}</h2>
                    <p class="py-6 text-base-content/70">{OWNER.summary}</p>
                    <div class="flex flex-wrap gap-3">
                        <Link to=AppRoute::Projects class="btn btn-primary gap-2">
                            "View Projects" <ArrowRight attr:class="h-4 w-4" />
                        </Link>
                        <Link to=AppRoute::Contact class="btn btn-outline">
                            "Get in Touch"
                        </Link>
                    </div>
                </div>
            </div>
        </section>

        <section class="py-16 bg-base-100">
            <div class="container mx-auto px-4 text-center">
                <h2 class="text-3xl font-bold">"Technical Skills"</h2>
                <p class="text-base-content/70 mt-2">
                    "Technologies and tools I use to build production-grade applications"
                </p>
                <div class="flex flex-wrap justify-center gap-3 mt-8 max-w-3xl mx-auto">
                    {SKILLS
                        .iter()
                        .map(|skill| {
                            let class = format!("badge badge-lg {}", skill.category.badge_class());
                            view! { <span class=class>{skill.name}</span> }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>

        <section class="py-16">
            <div class="container mx-auto px-4">
                <div class="card bg-primary text-primary-content max-w-3xl mx-auto">
                    <div class="card-body items-center text-center">
                        <h2 class="card-title text-2xl">"Interested in working together?"</h2>
                        <p>
                            "I'm always open to discussing new projects, creative ideas, or opportunities to be part of your vision."
                        </p>
                        <div class="card-actions mt-4">
                            <Link to=AppRoute::Contact class="btn">"Let's Talk"</Link>
                        </div>
                    </div>
                </div>
            </div>
        </section>
    }
}
