//! Application root component.

use coax_client::{PanelConfig, ids, tabs};
use leptos::prelude::*;

use crate::components::{ButtonBar, FieldList, FieldsetBlock, NoticeStack, SaveButton, TabBar, TabPanel};
use crate::provider::{PanelProvider, use_panel};

/// Endpoints derived from the page location; the socket is always on
/// port 8080 of the page's host.
fn panel_config() -> PanelConfig {
    let location = window().location();
    match (location.origin(), location.hostname()) {
        (Ok(origin), Ok(hostname)) => PanelConfig::for_location(&origin, &hostname),
        _ => {
            log::warn!("page location unavailable, using defaults");
            PanelConfig::default()
        }
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    let config = panel_config();
    log::info!("panel backend {} socket {}", config.base_url, config.ws_url);

    view! {
        <PanelProvider config=config>
            <header>
                <h1>"Coax/Cross Positioner"</h1>
            </header>
            <TabBar/>
            <main>
                <TabPanel key=tabs::STATUS>
                    <FieldList section=tabs::STATUS/>
                    <ButtonBar section=tabs::STATUS/>
                </TabPanel>
                <TabPanel key=tabs::CONFIG>
                    <form id=ids::CONFIG_FORM on:submit=|ev| ev.prevent_default()>
                        <FieldList section=tabs::CONFIG/>
                        <SaveButton/>
                    </form>
                </TabPanel>
                <TabPanel key=tabs::OPCUA>
                    <FieldList section=tabs::OPCUA/>
                    <Fieldsets section=tabs::OPCUA/>
                </TabPanel>
                <TabPanel key=tabs::MANUAL>
                    <FieldList section=tabs::MANUAL/>
                </TabPanel>
            </main>
            <NoticeStack/>
        </PanelProvider>
    }
}

#[component]
fn Fieldsets(section: &'static str) -> impl IntoView {
    let fieldset_ids: Vec<String> = use_panel()
        .view
        .signal()
        .with_untracked(|v| v.fieldsets_in(section).map(|f| f.id.clone()).collect());
    fieldset_ids.into_iter()
        .map(|id| view! { <FieldsetBlock id=id/> })
        .collect::<Vec<_>>()
}
