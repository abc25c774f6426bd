//! Home Page - connect panel and the connected agent's profile

use leptos::prelude::*;

use crate::components::{AgentProfile, ConnectPanel};

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="page">
            <ConnectPanel/>
            <AgentProfile/>
        </div>
    }
}
