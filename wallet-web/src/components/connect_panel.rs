//! Connect Panel - wallet connection, wrong-network banner, provider-missing notice

use agent_engine::ConnectionPhase;
use leptos::prelude::*;
use shared::short_address;

use crate::state::use_engine_context;

#[component]
pub fn ConnectPanel() -> impl IntoView {
    let ctx = use_engine_context();
    let chain = ctx.chain();
    let provider_available = move || ctx.state.with(|state| state.provider_available);

    view! {
        <div class="card">
            <h2 class="card-title">"Wallet"</h2>

            {move || {
                if !provider_available() {
                    return view! {
                        <p class="notice">
                            "No wallet detected. Install the Universal Profile browser extension to connect."
                        </p>
                    }
                    .into_any();
                }

                let account = ctx.state.with(|state| state.connection.account);
                match (account, ctx.phase()) {
                    (Some(account), phase) => {
                        let engine = ctx.engine();
                        let link = engine.address_link(&account);
                        let label = short_address(&account.to_string());
                        let wrong_chain = phase == ConnectionPhase::ConnectedWrongChain;
                        let banner = format!(
                            "Wrong network. Switch your wallet to {} (chain {}).",
                            chain.name, chain.chain_id,
                        );
                        view! {
                            <div>
                                <p>
                                    "Connected as "
                                    <a href=link target="_blank" rel="noopener" class="mono">{label}</a>
                                </p>
                                {wrong_chain.then(|| view! { <div class="banner banner-warn">{banner}</div> })}
                                <button class="btn btn-secondary" on:click=move |_| ctx.disconnect()>
                                    "Disconnect"
                                </button>
                            </div>
                        }
                        .into_any()
                    }
                    (None, phase) => {
                        let connecting = phase == ConnectionPhase::Connecting;
                        view! {
                            <button class="btn" disabled=connecting on:click=move |_| ctx.connect()>
                                {if connecting { "Connecting..." } else { "Connect Wallet" }}
                            </button>
                        }
                        .into_any()
                    }
                }
            }}

            {move || ctx.error.get().map(|error| view! { <p class="error">{error}</p> })}
        </div>
    }
}
