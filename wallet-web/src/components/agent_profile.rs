//! Agent Profile Panel - registration, metadata, reputation and social graph of the connected agent

use agent_engine::ConnectionPhase;
use alloy_primitives::Address;
use leptos::prelude::*;
use shared::short_address;

use crate::state::use_engine_context;

#[component]
pub fn AgentProfile() -> impl IntoView {
    let ctx = use_engine_context();
    let ready = move || ctx.phase() == ConnectionPhase::ConnectedCorrectChain;

    view! {
        <Show when=ready>
            <div class="card">
                <div style="display: flex; justify-content: space-between; align-items: center;">
                    <h2 class="card-title">"Agent Profile"</h2>
                    <button class="btn btn-small" on:click=move |_| ctx.refresh()>"Refresh"</button>
                </div>
                <AgentSummary/>
                <MetadataForm/>
                <FollowForm/>
                <PendingStatus/>
            </div>
        </Show>
    }
}

#[component]
fn AgentSummary() -> impl IntoView {
    let ctx = use_engine_context();

    move || {
        let agent = ctx.state.with(|state| state.agent.clone());
        if !agent.is_registered {
            return view! {
                <p class="muted">"This account is not registered as an agent yet."</p>
            }
            .into_any();
        }

        view! {
            <dl class="stats">
                <dt>"Metadata"</dt>
                <dd class="mono">{agent.metadata_uri.clone()}</dd>
                <dt>"Reputation"</dt>
                <dd>{agent.reputation_score.clone()}</dd>
                <dt>"Followers"</dt>
                <dd>{agent.follower_count()}</dd>
                <dt>"Following"</dt>
                <dd>{agent.following_count()}</dd>
            </dl>
        }
        .into_any()
    }
}

#[component]
fn MetadataForm() -> impl IntoView {
    let ctx = use_engine_context();
    let (uri, set_uri) = signal(String::new());

    let registered = move || ctx.state.with(|state| state.agent.is_registered);
    let busy = move || ctx.state.with(|state| state.pending.registering || state.pending.updating);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let value = uri.get();
        if registered() {
            ctx.update_metadata(value);
        } else {
            ctx.register(value);
        }
    };

    view! {
        <form class="form-row" on:submit=on_submit>
            <input
                type="text"
                placeholder="ipfs://... metadata URI"
                prop:value=uri
                on:input=move |ev| set_uri.set(event_target_value(&ev))
            />
            <button class="btn" type="submit" disabled=busy>
                {move || match (busy(), registered()) {
                    (true, _) => "Submitting...",
                    (false, true) => "Update Metadata",
                    (false, false) => "Register Agent",
                }}
            </button>
        </form>
    }
}

#[component]
fn FollowForm() -> impl IntoView {
    let ctx = use_engine_context();
    let (target, set_target) = signal(String::new());
    let (invalid, set_invalid) = signal(false);

    let busy = move || ctx.state.with(|state| state.pending.social);

    let parse_target = move || -> Option<Address> {
        let parsed = target.get().trim().parse::<Address>().ok();
        set_invalid.set(parsed.is_none());
        parsed
    };

    let on_follow = move |_| {
        if let Some(agent) = parse_target() {
            ctx.follow(agent);
        }
    };
    let on_unfollow = move |_| {
        if let Some(agent) = parse_target() {
            ctx.unfollow(agent);
        }
    };

    let following = move || {
        ctx.state.with(|state| state.agent.following.clone())
            .into_iter()
            .map(|agent| view! { <li class="mono">{short_address(&agent.to_string())}</li> })
            .collect_view()
    };

    view! {
        <div class="form-row">
            <input
                type="text"
                placeholder="0x... agent address"
                prop:value=target
                on:input=move |ev| set_target.set(event_target_value(&ev))
            />
            <button class="btn" disabled=busy on:click=on_follow>"Follow"</button>
            <button class="btn btn-secondary" disabled=busy on:click=on_unfollow>"Unfollow"</button>
        </div>
        <Show when=move || invalid.get()>
            <p class="error">"Enter a valid 0x address"</p>
        </Show>
        <ul class="address-list">{following}</ul>
    }
}

#[component]
fn PendingStatus() -> impl IntoView {
    let ctx = use_engine_context();

    move || {
        let pending = ctx.state.with(|state| state.pending.clone());
        let tx = pending.last_tx_hash.map(|hash| {
            let link = ctx.engine().tx_link(&hash);
            let label = short_address(&hash.to_string());
            let status = if pending.is_busy() { "Pending" } else { "Last transaction" };
            view! {
                <p>
                    {status} ": "
                    <a href=link target="_blank" rel="noopener" class="mono">{label}</a>
                </p>
            }
        });
        let error = pending.last_error.map(|error| view! { <p class="error">{error}</p> });

        view! { <div class="pending">{tx} {error}</div> }
    }
}
