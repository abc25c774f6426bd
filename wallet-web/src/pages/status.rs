//! Status Page - connection details of the current session

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::use_engine_context;

#[component]
pub fn StatusPage() -> impl IntoView {
    let ctx = use_engine_context();
    let navigate = use_navigate();
    let chain = ctx.chain();

    let on_disconnect = move |_| {
        ctx.disconnect();
        navigate("/", Default::default());
    };

    view! {
        <div class="page">
            <div class="card">
                <h1 class="card-title">"Session Status"</h1>

                <dl class="stats">
                    <dt>"Wallet"</dt>
                    <dd>
                        {move || {
                            if ctx.state.with(|state| state.provider_available) {
                                ctx.engine().provider_name().unwrap_or_default().to_string()
                            } else {
                                "not detected".to_string()
                            }
                        }}
                    </dd>
                    <dt>"Status"</dt>
                    <dd>{move || ctx.phase().to_string()}</dd>
                    <dt>"Account"</dt>
                    <dd class="mono">
                        {move || {
                            ctx.state
                                .with(|state| state.connection.account)
                                .map(|account| account.to_string())
                                .unwrap_or_else(|| "-".to_string())
                        }}
                    </dd>
                    <dt>"Wallet chain"</dt>
                    <dd>
                        {move || {
                            ctx.state
                                .with(|state| state.connection.chain_id)
                                .map(|id| id.to_string())
                                .unwrap_or_else(|| "-".to_string())
                        }}
                    </dd>
                    <dt>"Expected chain"</dt>
                    <dd>{format!("{} ({})", chain.name, chain.chain_id)}</dd>
                    <dt>"Contracts bound"</dt>
                    <dd>
                        {move || {
                            ctx.state.track();
                            if ctx.engine().is_bound() { "yes" } else { "no" }
                        }}
                    </dd>
                </dl>

                <Show when=move || ctx.state.with(|state| state.connection.connected)>
                    <button class="btn btn-secondary" style="width: 100%;" on:click=on_disconnect.clone()>
                        "Disconnect Wallet"
                    </button>
                </Show>
            </div>
        </div>
    }
}
