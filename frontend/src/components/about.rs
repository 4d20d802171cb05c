use leptos::prelude::*;

use crate::content::{OWNER, TECH_FOCUS};

const PRINCIPLES: &[(&str, &str)] = &[
    (
        "Layered Architecture",
        "Separation of concerns with clear boundaries between routes, controllers, services, and data access layers.",
    ),
    (
        "API-First Design",
        "Well-documented, consistent APIs that are easy to consume and maintain.",
    ),
    (
        "Data Integrity",
        "Careful database modeling with proper constraints, indexes, and transaction handling.",
    ),
    (
        "Clean Code",
        "Readable, tested, and documented code that communicates intent clearly.",
    ),
];

const VALUES: &[&str] = &[
    "Clean, readable code",
    "Proper system architecture",
    "Performance and scalability",
    "Continuous learning",
    "Collaborative development",
];

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <section class="py-16 text-center">
            <h1 class="text-4xl font-bold">"About Me"</h1>
            <p class="text-base-content/70 mt-2">
                "Engineer-first mindset. Clean architecture. Production-grade systems."
            </p>
        </section>

        <section class="container mx-auto px-4 pb-16 grid gap-8 lg:grid-cols-3">
            <div class="lg:col-span-2 space-y-6">
                <div>
                    <h2 class="text-2xl font-bold mb-2">"Who I Am"</h2>
                    <p>
                        "I'm " <strong>{OWNER.name}</strong>
                        ", a Software Engineer with a deep appreciation for well-architected systems and clean, maintainable code. My journey in software development has been driven by curiosity about how systems work at their core."
                    </p>
                </div>

                <div>
                    <h2 class="text-2xl font-bold mb-2">"My Approach"</h2>
                    <p class="mb-4">
                        "I'm particularly passionate about backend architecture and systems design. My approach combines:"
                    </p>
                    <ul class="space-y-2">
                        {PRINCIPLES
                            .iter()
                            .map(|(title, text)| view! {
                                <li><strong>{*title}</strong>" : "{*text}</li>
                            })
                            .collect_view()}
                    </ul>
                </div>

                <div>
                    <h2 class="text-2xl font-bold mb-4">"Technical Focus"</h2>
                    <div class="grid grid-cols-2 gap-4">
                        {TECH_FOCUS
                            .iter()
                            .map(|(area, stack)| view! {
                                <div class="card bg-base-100 shadow">
                                    <div class="card-body p-4">
                                        <h3 class="font-semibold">{*area}</h3>
                                        <p class="text-base-content/70">{*stack}</p>
                                    </div>
                                </div>
                            })
                            .collect_view()}
                    </div>
                </div>
            </div>

            <aside class="space-y-4">
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="card-title">"What I Value"</h3>
                        <ul class="list-disc list-inside">
                            {VALUES.iter().map(|v| view! { <li>{*v}</li> }).collect_view()}
                        </ul>
                    </div>
                </div>
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="card-title">"Current Focus"</h3>
                        <p class="text-base-content/70">
                            "Building production-grade applications with emphasis on backend architecture, database design, and API development."
                        </p>
                    </div>
                </div>
            </aside>
        </section>
    }
}
