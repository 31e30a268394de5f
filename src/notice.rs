use std::rc::Rc;

use yew::prelude::*;
use crate::types::{Notice, NoticeKind};

/// How long a notice stays on screen
pub const NOTICE_LIFETIME_MS: u32 = 3000;

pub enum NoticeAction {
    Show(Notice),
    Dismiss(u64),
}

/// Notices currently on screen, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoticeList {
    pub notices: Vec<Notice>,
}

impl Reducible for NoticeList {
    type Action = NoticeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut notices = self.notices.clone();
        match action {
            NoticeAction::Show(notice) => notices.push(notice),
            NoticeAction::Dismiss(id) => notices.retain(|n| n.id != id),
        }
        Rc::new(Self { notices })
    }
}

#[derive(Properties, PartialEq)]
pub struct NoticeStackProps {
    pub notices: Vec<Notice>,
    pub on_dismiss: Callback<u64>,
}

#[function_component(NoticeStack)]
pub fn notice_stack(props: &NoticeStackProps) -> Html {
    html! {
        <div class="fixed top-4 left-1/2 -translate-x-1/2 flex flex-col items-center gap-2 pointer-events-none" style="z-index: 100;">
            {
                props.notices.iter().map(|notice| {
                    let id = notice.id;
                    let on_dismiss = props.on_dismiss.clone();
                    let onclick = Callback::from(move |_: MouseEvent| on_dismiss.emit(id));

                    html! {
                        <div
                            key={id}
                            {onclick}
                            class={classes!(
                                "px-4",
                                "py-2",
                                "rounded-full",
                                "shadow-xl",
                                "text-sm",
                                "font-bold",
                                "text-white",
                                "pointer-events-auto",
                                "cursor-pointer",
                                match notice.kind {
                                    NoticeKind::Success => "bg-green-500",
                                    NoticeKind::Error => "bg-red-500",
                                }
                            )}
                        >
                            {&notice.text}
                        </div>
                    }
                }).collect::<Html>()
            }
        </div>
    }
}
