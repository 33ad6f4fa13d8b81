#[cfg(feature = "hydrate")]
mod browser;
mod cards;
mod particle_canvas;
mod portfolio;
mod portfolio3d;
mod view_mode;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, path};

use portfolio::PortfolioPage;
use portfolio3d::Portfolio3dPage;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <meta name="color-scheme" content="light dark" />
                <link rel="icon" type="image/svg+xml" href="/favicon.svg" />
                <link rel="stylesheet" id="leptos" href="/pkg/portfolio-site.css" />
                <link
                    rel="stylesheet"
                    href="https://cdn.jsdelivr.net/gh/devicons/devicon@latest/devicon.min.css"
                />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    view! {
        <Title formatter=|title| format!("Portfolio - {title}") />
        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=path!("/") view=PortfolioPage />
                <Route path=path!("/3d") view=Portfolio3dPage />
            </Routes>
        </Router>
    }
}

/// Opens `url` in a new tab. A no-op outside the browser.
pub(crate) fn open_link(url: &str) {
    #[cfg(feature = "hydrate")]
    crate::profile::activate(&browser::BrowserOpener, url);
    #[cfg(not(feature = "hydrate"))]
    let _ = url;
}
