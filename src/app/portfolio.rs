use std::sync::Arc;

use leptos::{either::Either, prelude::*};
use leptos_meta::Title;

use crate::profile::ProfileContent;
use crate::view_mode::ViewMode;

use super::cards::{CardStyle, ContactLinks, ExperienceCard, ProjectCard, SkillTag};
use super::view_mode::{use_view_mode, ViewModeToggle};

const PROFILE: &str = "portfolio";

pub(super) const CLASSIC: CardStyle = CardStyle {
    card: "bg-white dark:bg-gray-900 border border-gray-200 dark:border-gray-700 shadow-sm",
    title: "text-gray-900 dark:text-gray-100",
    muted: "text-gray-600 dark:text-gray-400",
    tag: "inline-block text-[16px] bg-gray-900/10 dark:bg-white/10 rounded-full px-3 py-1 font-semibold mr-2 mb-2 shadow-md",
    icon_button: "p-2 rounded-md hover:bg-gray-900/10 dark:hover:bg-white/10",
    truncate: false,
};

#[component]
pub fn PortfolioPage() -> impl IntoView {
    let (mode, toggle) = use_view_mode(ViewMode::Light);
    let content = match ProfileContent::load(PROFILE) {
        Ok(profile) => {
            let name = profile.name.clone();
            let avatar = profile.avatar.clone();
            Either::Left(view! {
                <div class="container mx-auto px-4 py-8">
                    <header class="flex justify-between items-center mb-8">
                        <h1 class="text-2xl font-bold">{name}</h1>
                        <div class="flex items-center space-x-4">
                            <ViewModeToggle
                                mode
                                on_toggle=toggle
                                class="px-4 py-2 rounded-md bg-gray-900 text-white dark:bg-white dark:text-black"
                            />
                            {avatar
                                .map(|src| {
                                    view! {
                                        <img
                                            src=src
                                            alt="Profile"
                                            width="32"
                                            height="32"
                                            class="w-10 h-10 rounded-full hidden sm:block"
                                        />
                                    }
                                })}
                        </div>
                    </header>
                    <ClassicSections profile />
                </div>
            })
        }
        Err(err) => {
            log::error!("couldn't load profile {PROFILE}: {err}");
            Either::Right(view! { <p class="p-8 text-center">"Portfolio unavailable."</p> })
        }
    };

    view! {
        <Title text="Portfolio" />
        <div class="lg:px-[200px]">
            <div class=move || {
                format!(
                    "min-h-screen w-full text-pretty mx-auto bg-gray-500 dark:bg-gray-950 text-gray-900 dark:text-gray-100 {}",
                    mode.get().class(),
                )
            }>{content}</div>
        </div>
    }
}

/// Everything below the header: about-me, experience, skills, projects and
/// footer links.
#[component]
pub(super) fn ClassicSections(profile: Arc<ProfileContent>) -> impl IntoView {
    let button = CLASSIC.icon_button;
    view! {
        <section class="mb-8">
            <div class="flex gap-10 items-baseline">
                <h2 class="text-lg font-semibold mb-4 hidden sm:block">"About Me"</h2>
                <ContactLinks contacts=profile.contacts.clone() button_class=button />
            </div>
            <p class="text-sm sm:text-center lg:text-left text-gray-800 dark:text-gray-300">
                {profile.bio.clone()}
            </p>
        </section>
        <section class="mb-8">
            <h2 class="text-xl font-semibold mb-4">"Work Experience"</h2>
            {profile
                .experience
                .iter()
                .cloned()
                .map(|experience| view! { <ExperienceCard experience style=CLASSIC /> })
                .collect_view()}
        </section>
        <section class="mb-8">
            <h2 class="text-xl font-semibold mb-4">"Skills"</h2>
            <div class="flex flex-wrap">
                {profile
                    .skills
                    .iter()
                    .cloned()
                    .map(|label| view! { <SkillTag label class=CLASSIC.tag /> })
                    .collect_view()}
            </div>
        </section>
        <section class="mb-8">
            <h2 class="text-xl font-semibold mb-4">"Projects"</h2>
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-4">
                {profile
                    .projects
                    .iter()
                    .cloned()
                    .map(|project| view! { <ProjectCard project style=CLASSIC /> })
                    .collect_view()}
            </div>
        </section>
        <footer class="mt-8 mb-8 flex justify-center">
            <ContactLinks contacts=profile.contacts.clone() button_class=button />
        </footer>
    }
}
