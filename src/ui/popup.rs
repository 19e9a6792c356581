/// Popup UI for Tab Organizer extension

use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::console;
use yew::prelude::*;

use crate::actions::Action;

#[derive(Clone, PartialEq)]
enum AppState {
    Idle,
    Working(String),
    Error(String),
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Idle);

    let run_action = {
        let state = state.clone();
        move |action: Action| {
            let state = state.clone();
            Callback::from(move |_| {
                let state = state.clone();
                state.set(AppState::Working(action.label().to_string()));

                spawn_local(async move {
                    match action.run().await {
                        Ok(_) => {
                            console::log_1(&format!("{} finished", action.label()).into());
                            state.set(AppState::Idle);
                        }
                        Err(e) => {
                            state.set(AppState::Error(e));
                        }
                    }
                });
            })
        }
    };

    let is_busy = !matches!(*state, AppState::Idle);

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Tab Organizer"}</h1>

            {match &*state {
                AppState::Working(label) => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{label.clone()}</p>
                    </div>
                },
                AppState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                AppState::Idle => html! {}
            }}

            <div class="flex-column-gap">
                {for Action::ALL.iter().map(|action| html! {
                    <Button
                        onclick={run_action(*action)}
                        disabled={is_busy}
                        variant={ButtonVariant::Secondary}
                        block={true}
                    >
                        {action.label()}
                    </Button>
                })}
            </div>

            <p class="footer-popup">
                {"Tab Organizer v0.1.0"}
            </p>
        </div>
    }
}
