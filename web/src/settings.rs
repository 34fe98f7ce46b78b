use crate::theme::Theme;
use crate::utils::*;
use concentration_core as game;
use serde::{Deserialize, Serialize};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Sidebar choices, persisted between visits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub mode: game::Mode,
    pub solo_name: String,
    pub player_names: Vec<String>,
    pub difficulty: game::Difficulty,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: game::Mode::Solo,
            solo_name: String::new(),
            player_names: vec![String::new(); 2],
            difficulty: game::Difficulty::default(),
            sound_enabled: true,
        }
    }
}

impl Settings {
    pub(crate) fn load() -> Self {
        load_local().unwrap_or_default()
    }

    pub(crate) fn save(&self) {
        save_local(self);
    }

    pub(crate) fn player_count(&self) -> usize {
        self.player_names.len()
    }

    pub(crate) fn set_player_count(&mut self, count: usize) {
        let (min, max) = game::Mode::Multiplayer.player_range();
        self.player_names.resize(count.clamp(min, max), String::new());
    }

    pub(crate) fn roster(&self) -> game::Roster {
        match self.mode {
            game::Mode::Solo => game::Roster::solo(&self.solo_name),
            game::Mode::Multiplayer => game::Roster::multiplayer(&self.player_names).unwrap_or_else(|err| {
                log::warn!("bad stored roster ({}), using two blank players", err);
                let mut fixed = self.clone();
                fixed.set_player_count(self.player_count());
                game::Roster::multiplayer(&fixed.player_names)
                    .unwrap_or_else(|_| game::Roster::solo(&self.solo_name))
            }),
        }
    }

    pub(crate) fn game_setup(&self) -> game::GameSetup {
        game::GameSetup {
            config: self.difficulty.game_config(),
            roster: self.roster(),
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "concentration:settings";
}

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsProps {
    pub settings: Settings,
    pub theme: Option<Theme>,
    #[prop_or_default]
    pub notice: Option<AttrValue>,
    pub on_change: Callback<Settings>,
    pub on_theme: Callback<Option<Theme>>,
    pub on_clear_leaderboard: Callback<()>,
}

#[function_component]
pub(crate) fn SettingsView(props: &SettingsProps) -> Html {
    let SettingsProps {
        settings,
        theme,
        notice,
        on_change,
        on_theme,
        on_clear_leaderboard,
    } = props;

    // every control edits a copy of the current settings and hands it back
    let edit = |apply: fn(&mut Settings, String)| {
        let settings = settings.clone();
        let on_change = on_change.clone();
        move |value: String| {
            let mut next = settings.clone();
            apply(&mut next, value);
            on_change.emit(next);
        }
    };

    let on_sound = {
        let settings = settings.clone();
        let on_change = on_change.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = settings.clone();
            next.sound_enabled = input.checked();
            on_change.emit(next);
        })
    };

    let mode_radio = |mode: game::Mode, label: &'static str| {
        let checked = settings.mode == mode;
        let settings = settings.clone();
        let on_change = on_change.clone();
        let onchange = Callback::from(move |_: Event| {
            let mut next = settings.clone();
            next.mode = mode;
            on_change.emit(next);
        });
        html! {
            <label>
                <input type="radio" name="mode" {checked} {onchange}/>
                {label}
            </label>
        }
    };

    let names = match settings.mode {
        game::Mode::Solo => {
            let set = edit(|s, value| s.solo_name = value);
            let oninput = Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                set(input.value());
            });
            html! {
                <label>
                    {"Your name"}
                    <input type="text" value={settings.solo_name.clone()} {oninput}/>
                </label>
            }
        }
        game::Mode::Multiplayer => {
            let set_count = edit(|s, value| s.set_player_count(value.parse().unwrap_or(2)));
            let onchange = Callback::from(move |e: Event| {
                let select: HtmlSelectElement = e.target_unchecked_into();
                set_count(select.value());
            });
            let count = settings.player_count();
            html! {
                <>
                    <label>
                        {"Number of Players"}
                        <select {onchange}>
                            { for (2..=game::MAX_PLAYERS).map(|n| html! {
                                <option value={n.to_string()} selected={n == count}>{n.to_string()}</option>
                            }) }
                        </select>
                    </label>
                    { for settings.player_names.iter().enumerate().map(|(i, name)| {
                        let settings = settings.clone();
                        let on_change = on_change.clone();
                        let oninput = Callback::from(move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            let mut next = settings.clone();
                            if let Some(slot) = next.player_names.get_mut(i) {
                                *slot = input.value();
                            }
                            on_change.emit(next);
                        });
                        html! {
                            <label>
                                {format!("Player {} name", i + 1)}
                                <input type="text" value={name.clone()} {oninput}/>
                            </label>
                        }
                    }) }
                </>
            }
        }
    };

    let on_difficulty = {
        let set = edit(|s, value| {
            if let Some(difficulty) = game::Difficulty::from_label(&value) {
                s.difficulty = difficulty;
            }
        });
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            set(select.value());
        })
    };

    let theme_radio = |choice: Theme| {
        let on_theme = on_theme.clone();
        let onchange = Callback::from(move |_: Event| on_theme.emit(Some(choice)));
        html! {
            <label>
                <input type="radio" name="theme" checked={theme.unwrap_or_default() == choice} {onchange}/>
                {choice.label()}
            </label>
        }
    };

    let on_clear = {
        let on_clear_leaderboard = on_clear_leaderboard.clone();
        Callback::from(move |_: MouseEvent| on_clear_leaderboard.emit(()))
    };

    html! {
        <aside class="sidebar">
            <h2>{"🧩 Login & Settings"}</h2>
            <label>
                <input type="checkbox" checked={settings.sound_enabled} onchange={on_sound}/>
                {"🔊 Sound Effects"}
            </label>
            <fieldset>
                <legend>{"Game Mode"}</legend>
                {mode_radio(game::Mode::Solo, "Solo")}
                {mode_radio(game::Mode::Multiplayer, "Multiplayer")}
            </fieldset>
            {names}
            <label>
                {"Difficulty level"}
                <select onchange={on_difficulty}>
                    { for game::Difficulty::ALL.into_iter().map(|d| html! {
                        <option value={d.label()} selected={d == settings.difficulty}>{d.label()}</option>
                    }) }
                </select>
            </label>
            <fieldset>
                <legend>{"🎨 Theme Mode"}</legend>
                { for Theme::ALL.into_iter().map(theme_radio) }
            </fieldset>
            <button class="danger" onclick={on_clear}>{"🗑️ Clear Leaderboard"}</button>
            if let Some(notice) = notice {
                <p class="notice success">{notice.clone()}</p>
            }
        </aside>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_count_is_clamped_and_keeps_names() {
        let mut settings = Settings::default();
        settings.player_names[0] = "ana".to_string();

        settings.set_player_count(9);
        assert_eq!(settings.player_count(), game::MAX_PLAYERS);
        settings.set_player_count(1);
        assert_eq!(settings.player_names, vec!["ana".to_string(), String::new()]);
    }

    #[test]
    fn setup_follows_mode_and_difficulty() {
        let mut settings = Settings {
            solo_name: "ana".to_string(),
            difficulty: game::Difficulty::Medium,
            ..Settings::default()
        };
        let setup = settings.game_setup();
        assert_eq!(setup.roster.mode(), game::Mode::Solo);
        assert_eq!(setup.config.num_pairs(), 8);

        settings.mode = game::Mode::Multiplayer;
        settings.player_names = vec!["a".into(), "b".into(), "c".into()];
        assert_eq!(settings.roster().player_count(), 3);
    }

    #[test]
    fn broken_stored_roster_is_repaired() {
        let settings = Settings {
            mode: game::Mode::Multiplayer,
            player_names: vec!["only".to_string()],
            ..Settings::default()
        };
        let roster = settings.roster();
        assert_eq!(roster.mode(), game::Mode::Multiplayer);
        assert_eq!(roster.player_count(), 2);
        assert_eq!(roster.name(0), Some("only"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"solo_name":"ana"}"#).unwrap();
        assert_eq!(settings.solo_name, "ana");
        assert!(settings.sound_enabled);
        assert_eq!(settings.player_count(), 2);
    }
}
