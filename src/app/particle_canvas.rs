use leptos::{html, prelude::*};

use crate::background::BackgroundConfig;

/// Full-viewport canvas behind the page content with a rotating particle
/// field. Mounted once the canvas exists, torn down with the owning view.
#[component]
pub fn ParticleCanvas(config: BackgroundConfig) -> impl IntoView {
    let canvas_ref = NodeRef::<html::Canvas>::new();

    #[cfg(feature = "hydrate")]
    {
        use std::rc::Rc;

        use rand::{rngs::SmallRng, SeedableRng};

        use super::browser::BrowserHost;
        use crate::background::ParticleBackground;

        let background = StoredValue::new_local(None::<ParticleBackground<BrowserHost>>);

        Effect::new(move |_| {
            let Some(canvas) = canvas_ref.get() else {
                return;
            };
            if background.with_value(Option::is_some) {
                return;
            }
            let Some(host) = BrowserHost::new(canvas) else {
                log::debug!("particle background skipped: no window");
                return;
            };
            let mut rng = SmallRng::seed_from_u64(js_sys::Date::now() as u64);
            match ParticleBackground::mount(Rc::new(host), config.clone(), &mut rng) {
                Ok(mounted) => {
                    log::debug!(
                        "particle background mounted with {} points",
                        mounted.point_count()
                    );
                    background.set_value(Some(mounted));
                }
                Err(err) => log::debug!("particle background skipped: {err}"),
            }
        });

        on_cleanup(move || {
            // dropping the background cancels its frame and resize listener
            background.update_value(|mounted| {
                if mounted.take().is_some() {
                    log::debug!("particle background torn down");
                }
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = config;

    view! {
        <canvas
            node_ref=canvas_ref
            aria-hidden="true"
            class="fixed top-0 left-0 w-full h-full -z-10 pointer-events-none"
        ></canvas>
    }
}
