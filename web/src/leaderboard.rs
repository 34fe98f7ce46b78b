use crate::utils::StorageKey;
use concentration_core::{Leaderboard, ScoreRecord};
use gloo::storage::{LocalStorage, Storage};
use yew::prelude::*;

impl StorageKey for Leaderboard {
    const KEY: &'static str = "concentration:leaderboard";
}

/// Reads the stored table; a missing or unreadable table counts as empty.
pub(crate) fn load() -> Leaderboard {
    match LocalStorage::raw().get_item(Leaderboard::KEY) {
        Ok(Some(json)) => Leaderboard::from_json_or_default(&json),
        Ok(None) => Leaderboard::new(),
        Err(err) => {
            log::error!("could not read leaderboard: {:?}", err);
            Leaderboard::new()
        }
    }
}

pub(crate) fn save(leaderboard: &Leaderboard) {
    let json = match leaderboard.to_json() {
        Ok(json) => json,
        Err(err) => {
            log::error!("could not encode leaderboard: {}", err);
            return;
        }
    };
    if let Err(err) = LocalStorage::raw().set_item(Leaderboard::KEY, &json) {
        log::error!("could not save leaderboard: {:?}", err);
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct LeaderboardProps {
    pub entries: Vec<ScoreRecord>,
}

#[function_component]
pub(crate) fn LeaderboardView(props: &LeaderboardProps) -> Html {
    let body = if props.entries.is_empty() {
        html! { <p class="notice info">{"No leaderboard entries yet. Be the first!"}</p> }
    } else {
        html! {
            <table class="leaderboard">
                <thead>
                    <tr>
                        <th>{"#"}</th>
                        <th>{"Name"}</th>
                        <th>{"Difficulty"}</th>
                        <th>{"Moves"}</th>
                        <th>{"Date"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for props.entries.iter().enumerate().map(|(rank, record)| html! {
                        <tr>
                            <td>{(rank + 1).to_string()}</td>
                            <td>{record.name.clone()}</td>
                            <td>{record.difficulty.clone()}</td>
                            <td>{record.moves.to_string()}</td>
                            <td>{record.timestamp.clone()}</td>
                        </tr>
                    }) }
                </tbody>
            </table>
        }
    };

    html! {
        <section class="leaderboard">
            <h2>{"🏅 Leaderboard"}</h2>
            {body}
        </section>
    }
}
