use leptos::{either::Either, prelude::*};

use crate::profile::{emphasis, ContactLink, Fragment, Project, WorkExperience};

use super::open_link;

/// Class strings for one page's card palette.
#[derive(Debug, Clone, Copy)]
pub struct CardStyle {
    pub card: &'static str,
    pub title: &'static str,
    pub muted: &'static str,
    pub tag: &'static str,
    pub icon_button: &'static str,
    /// Clip long lines to a single row.
    pub truncate: bool,
}

impl CardStyle {
    fn clip(&self, class: &str) -> String {
        if self.truncate {
            format!("{class} truncate")
        } else {
            class.to_string()
        }
    }
}

/// Icon button that opens `url` in a new tab.
#[component]
pub fn LinkButton(
    url: String,
    icon: &'static str,
    label: &'static str,
    class: &'static str,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class=class
            title=label
            aria-label=label
            on:click=move |_| open_link(&url)
        >
            <i class=icon></i>
        </button>
    }
}

#[component]
pub fn ContactLinks(contacts: Vec<ContactLink>, button_class: &'static str) -> impl IntoView {
    view! {
        <div class="flex justify-center space-x-4">
            {contacts
                .into_iter()
                .map(|contact| {
                    view! {
                        <LinkButton
                            url=contact.url
                            icon=contact.kind.icon()
                            label=contact.kind.label()
                            class=button_class
                        />
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn SkillTag(label: String, class: &'static str) -> impl IntoView {
    view! { <span class=class>{label}</span> }
}

#[component]
fn Highlight(text: String) -> impl IntoView {
    emphasis(&text)
        .into_iter()
        .map(|fragment| match fragment {
            Fragment::Plain(s) => Either::Left(s.to_string()),
            Fragment::Strong(s) => Either::Right(view! { <strong>{s.to_string()}</strong> }),
        })
        .collect_view()
}

#[component]
pub fn ExperienceCard(experience: WorkExperience, style: CardStyle) -> impl IntoView {
    let heading = experience.heading();
    let subtitle = experience.subtitle();
    let item_class = style.clip("");
    view! {
        <div class=format!("mb-4 rounded-lg p-6 {}", style.card)>
            <div class="flex justify-between items-center gap-4">
                <h3 class=style.clip(&format!("font-semibold leading-5 {}", style.title))>
                    {heading}
                </h3>
                <div class="flex items-center space-x-2 shrink-0">
                    {experience
                        .certificate
                        .map(|url| {
                            view! {
                                <LinkButton
                                    url
                                    icon="extra-download"
                                    label="Certificate"
                                    class=style.icon_button
                                />
                            }
                        })}
                    <p class=format!("text-sm {}", style.muted)>{experience.period}</p>
                </div>
            </div>
            {subtitle.map(|s| view! { <p class=format!("text-sm {}", style.muted)>{s}</p> })}
            <ul class=format!("mt-4 list-disc pl-5 space-y-1 {}", style.muted)>
                {experience
                    .highlights
                    .into_iter()
                    .map(|text| {
                        view! {
                            <li class=item_class.clone()>
                                <Highlight text />
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}

#[component]
pub fn ProjectCard(project: Project, style: CardStyle) -> impl IntoView {
    view! {
        <div class=format!(
            "h-full rounded-lg p-6 transition-transform duration-200 hover:scale-[1.02] {}",
            style.card,
        )>
            <div class="flex justify-between items-center gap-4">
                <h3 class=format!("font-semibold {}", style.title)>{project.title}</h3>
                <div class="flex space-x-2 shrink-0">
                    <LinkButton
                        url=project.demo
                        icon="extra-link"
                        label="Open Project"
                        class=style.icon_button
                    />
                    <LinkButton
                        url=project.source
                        icon="devicon-github-plain"
                        label="View Source"
                        class=style.icon_button
                    />
                </div>
            </div>
            <p class=style.clip(&format!("mt-2 {}", style.muted))>{project.description}</p>
            <div class="mt-4 flex flex-wrap">
                {project
                    .tags
                    .into_iter()
                    .map(|label| view! { <SkillTag label class=style.tag /> })
                    .collect_view()}
            </div>
        </div>
    }
}
