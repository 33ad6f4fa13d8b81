use std::sync::Arc;

use leptos::{either::Either, prelude::*};
use leptos_meta::Title;

use crate::profile::ProfileContent;
use crate::view_mode::ViewMode;

use super::cards::{CardStyle, ContactLinks, ExperienceCard, ProjectCard, SkillTag};
use super::particle_canvas::ParticleCanvas;
use super::view_mode::{use_view_mode, ViewModeToggle};

const PROFILE: &str = "portfolio3d";

const COSMIC: CardStyle = CardStyle {
    card: "bg-black border border-white/20 overflow-hidden",
    title: "text-white",
    muted: "text-white/70",
    tag: "inline-block bg-white text-black rounded-full px-3 py-1 text-sm font-semibold mr-2 mb-2 transition-transform duration-150 hover:scale-105 active:scale-95",
    icon_button: "p-2 rounded-md text-white hover:bg-white/10",
    truncate: true,
};

#[component]
pub fn Portfolio3dPage() -> impl IntoView {
    let (mode, toggle) = use_view_mode(ViewMode::Dark);
    let profile = match ProfileContent::load(PROFILE) {
        Ok(profile) => profile,
        Err(err) => {
            log::error!("couldn't load profile {PROFILE}: {err}");
            return Either::Right(view! {
                <Title text="Portfolio" />
                <p class="p-8 text-center">"Portfolio unavailable."</p>
            });
        }
    };

    let background = profile
        .background
        .clone()
        .map(|config| view! { <ParticleCanvas config /> });
    let name = profile.name.clone();
    let avatar = profile.avatar.clone();

    Either::Left(view! {
        <Title text="Portfolio" />
        <div class=move || {
            format!("min-h-screen bg-black text-white {}", mode.get().class())
        }>
            {background}
            <div class="container mx-auto px-4 py-8 relative z-10 overflow-hidden">
                <header class="flex justify-between items-center mb-8">
                    <h1 class="text-4xl font-bold truncate section-content">{name}</h1>
                    <div class="flex items-center space-x-4">
                        <ViewModeToggle
                            mode
                            on_toggle=toggle
                            class="px-4 py-2 rounded-md bg-white text-black hover:bg-gray-200 text-xl"
                        />
                        {avatar
                            .map(|src| {
                                view! {
                                    <img
                                        src=src
                                        alt="Profile"
                                        width="48"
                                        height="48"
                                        class="w-12 h-12 rounded-full border-2 border-white"
                                    />
                                }
                            })}
                    </div>
                </header>
                <CosmicSections profile />
            </div>
        </div>
    })
}

/// About-me, experience, skills (only when there are any) and the project
/// grid, all single-line truncated.
#[component]
fn CosmicSections(profile: Arc<ProfileContent>) -> impl IntoView {
    let skills = profile.skills.clone();
    view! {
        <section class="mb-12 section-content">
            <div class="flex flex-col md:flex-row justify-between items-start md:items-center gap-4 mb-4">
                <h2 class="text-3xl font-semibold truncate">"About Me"</h2>
                <ContactLinks contacts=profile.contacts.clone() button_class=COSMIC.icon_button />
            </div>
            <p class="text-white/70 text-lg truncate">{profile.bio.clone()}</p>
        </section>

        <section class="mb-12 section-content">
            <h2 class="text-3xl font-semibold mb-4 truncate">"Work Experience"</h2>
            {profile
                .experience
                .iter()
                .cloned()
                .map(|experience| view! { <ExperienceCard experience style=COSMIC /> })
                .collect_view()}
        </section>

        {(!skills.is_empty())
            .then(|| {
                view! {
                    <section class="mb-12 section-content">
                        <h2 class="text-3xl font-semibold mb-4 truncate">"Skills"</h2>
                        <div class="flex flex-wrap">
                            {skills
                                .into_iter()
                                .map(|label| view! { <SkillTag label class=COSMIC.tag /> })
                                .collect_view()}
                        </div>
                    </section>
                }
            })}

        <section class="mb-12 section-content">
            <h2 class="text-3xl font-semibold mb-4 truncate">"Projects"</h2>
            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                {profile
                    .projects
                    .iter()
                    .cloned()
                    .map(|project| view! { <ProjectCard project style=COSMIC /> })
                    .collect_view()}
            </div>
        </section>
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;
    use leptos::tachys::view::RenderHtml;

    fn render(profile: Arc<ProfileContent>) -> String {
        let owner = Owner::new();
        owner.with(|| view! { <CosmicSections profile /> }.to_html())
    }

    #[test]
    fn test_render_is_pure() {
        let profile = ProfileContent::load(PROFILE).expect("portfolio3d should load");
        let first = render(profile.clone());
        let second = render(profile.clone());
        assert_eq!(first, second);
        assert!(first.contains("Full Stack Developer - Data Vidhya"));
        assert!(first.contains("Projects"));
        assert!(first.contains("font-semibold leading-5 text-white truncate"));
        assert!(!first.contains("Skills"));
    }

    #[test]
    fn test_skills_render_when_present() {
        let profile = ProfileContent::from_json(
            "cosmic",
            r#"{
                "name": "Test Person",
                "bio": "Writes tests.",
                "contacts": [{ "kind": "email", "url": "mailto:test@example.com" }],
                "skills": ["Rust", "WebGL"]
            }"#,
        )
        .expect("profile should parse");
        let html = render(Arc::new(profile));
        assert!(html.contains("Skills"));
        assert!(html.contains("WebGL"));
        assert!(html.contains("bg-white text-black rounded-full"));
    }
}
