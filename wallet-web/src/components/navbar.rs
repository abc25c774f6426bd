//! Navigation Bar Component

use agent_engine::ConnectionPhase;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::use_engine_context;

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_engine_context();

    let badge_class = move || match ctx.phase() {
        ConnectionPhase::ConnectedCorrectChain => "badge badge-ok",
        ConnectionPhase::ConnectedWrongChain => "badge badge-warn",
        ConnectionPhase::Connecting | ConnectionPhase::Disconnected => "badge",
    };

    view! {
        <nav>
            <div style="max-width: 1200px; margin: 0 auto; padding: 0 24px; display: flex; justify-content: space-between; align-items: center;">
                <A href="/" attr:class="nav-link-clean">
                    <span class="nav-title">"Agent Social"</span>
                </A>
                <div style="display: flex; gap: 16px; align-items: center;">
                    <A href="/status" attr:class="nav-link">"Status"</A>
                    <span class=badge_class>{move || ctx.phase().to_string()}</span>
                </div>
            </div>
        </nav>
    }
}
