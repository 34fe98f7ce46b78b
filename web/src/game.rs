use crate::leaderboard::{self, LeaderboardView};
use crate::settings::{Settings, SettingsView};
use crate::sound::SoundPlayer;
use crate::theme::Theme;
use crate::utils::*;
use clap::Args;
use concentration_core as game;
use gloo::timers::callback::Interval;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use yew::prelude::*;

/// How often pending cooldowns and the clock are polled.
const TICK_MILLIS: u32 = 250;

const HIDDEN_FACE: &str = "❓";

#[derive(Clone, Debug, PartialEq, Eq)]
enum StatusLine {
    Success(String),
    Info(String),
    Warning(String),
}

impl StatusLine {
    fn class(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Info(_) => "info",
            Self::Warning(_) => "warning",
        }
    }

    fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Info(text) | Self::Warning(text) => text,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct GameSession {
    pub engine: game::MatchEngine,
    pub difficulty: game::Difficulty,
    pub score_submitted: bool,
}

impl GameSession {
    fn new(engine: game::MatchEngine, difficulty: game::Difficulty) -> Self {
        Self {
            engine,
            difficulty,
            score_submitted: false,
        }
    }

    fn deal(settings: &Settings, seed: u64, timing: game::EngineConfig) -> game::Result<Self> {
        let generator = game::RandomDeckGenerator::new(seed);
        let engine = game::MatchEngine::deal(settings.game_setup(), generator, timing)?;
        Ok(Self::new(engine, settings.difficulty))
    }

    /// Whether this game was dealt for the same board and players as `settings` describe.
    fn matches_settings(&self, settings: &Settings) -> bool {
        let setup = settings.game_setup();
        let roster = self.engine.roster();
        self.difficulty == settings.difficulty
            && self.engine.config() == setup.config
            && roster.mode() == setup.roster.mode()
            && roster.names() == setup.roster.names()
    }

    /// A stored game is picked up again only if nothing it was dealt with has changed since.
    fn can_resume(&self, settings: &Settings, timing: game::EngineConfig) -> bool {
        self.engine.timing() == timing && self.matches_settings(settings)
    }

    /// Final play time, shown once the game is over.
    fn clock_text(&self, now: game::Millis) -> Option<String> {
        self.engine
            .is_game_over()
            .then(|| format_elapsed(self.engine.elapsed(now)))
    }

    fn is_solo(&self) -> bool {
        self.engine.roster().mode() == game::Mode::Solo
    }

    fn header_text(&self) -> String {
        if self.is_solo() {
            format!("🃏 Memory Game - Hello, {}!", self.engine.roster().display_name(0))
        } else {
            "🃏 Memory Game - Multiplayer Mode".to_string()
        }
    }

    fn progress_text(&self) -> String {
        format!(
            "Progress: {}/{} pairs ({:.1}%)",
            self.engine.matched_pairs(),
            self.engine.num_pairs(),
            self.engine.progress_percent()
        )
    }

    fn scores_text(&self) -> String {
        let roster = self.engine.roster();
        (0..roster.player_count())
            .map(|player| {
                let player = player as game::PlayerId;
                format!("{}: {}", roster.display_name(player), roster.score(player))
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }

    fn efficiency_text(&self) -> String {
        match self.engine.efficiency() {
            None => "-".to_string(),
            Some(_) if u32::from(self.engine.num_pairs()) == self.engine.moves() => "Perfect!".to_string(),
            Some(efficiency) => format!("{:.1}%", efficiency),
        }
    }

    fn completion_text(&self) -> Option<String> {
        if !self.engine.is_game_over() {
            return None;
        }
        let roster = self.engine.roster();
        if self.is_solo() {
            return Some(format!(
                "🎉 Congratulations {}, you finished the game in {} moves!",
                roster.display_name(0),
                self.engine.moves()
            ));
        }

        let winners = self.engine.winners();
        let best = winners.first().map_or(0, |&player| roster.score(player));
        let names: Vec<String> = winners.iter().map(|&player| roster.display_name(player)).collect();
        Some(match names.as_slice() {
            [winner] => format!("🎉 Congratulations {}, you won with {} pairs!", winner, best),
            _ => format!("🎉 It's a tie between {} with {} pairs!", names.join(", "), best),
        })
    }

    fn status_lines(&self) -> Vec<StatusLine> {
        let mut lines = Vec::new();
        if let Some(text) = self.completion_text() {
            lines.push(StatusLine::Success(text));
            if self.is_solo() {
                if self.score_submitted {
                    let name = self.engine.roster().display_name(0);
                    lines.push(StatusLine::Success(format!("Score submitted for {}!", name)));
                    lines.push(StatusLine::Info(
                        "Score submitted! Start a new game to submit another score.".to_string(),
                    ));
                } else {
                    lines.push(StatusLine::Warning(
                        "Please enter your name in the sidebar to submit your score.".to_string(),
                    ));
                }
            }
        } else if self.engine.is_waiting() {
            lines.push(StatusLine::Info("🤔 Cards will flip back in a moment...".to_string()));
        } else if self.engine.last_match() {
            lines.push(StatusLine::Success("🎯 Great match! Keep going!".to_string()));
        }
        lines
    }

    /// Builds the leaderboard row for a finished solo game, once.
    fn take_score(&mut self, timestamp: &str) -> Option<game::ScoreRecord> {
        if self.score_submitted {
            return None;
        }
        let record = game::ScoreRecord::from_engine(&self.engine, self.difficulty.label(), timestamp)?;
        self.score_submitted = true;
        Some(record)
    }
}

impl StorageKey for GameSession {
    const KEY: &'static str = "concentration:game:v1";
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Reveal(game::CellIndex),
    Tick,
    NewGame,
    UpdateSettings(Settings),
    ApplyTheme(Option<Theme>),
    ClearLeaderboard,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    index: game::CellIndex,
    state: game::CardState,
    face: &'static str,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::CellIndex>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    use game::CardState::*;

    let CardProps {
        index,
        state,
        face,
        locked,
        callback,
    } = props.clone();

    let class = classes!(
        "card",
        match state {
            Hidden => "hidden",
            Revealed => "revealed",
            Matched => "matched",
        },
        locked.then_some("locked")
    );

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", index);
        callback.emit(index);
    });

    html! {
        <td><button {class} {onclick} disabled={locked}>{face}</button></td>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// How long a mismatched pair stays face up
    #[arg(long)]
    cooldown_ms: Option<u64>,
}

impl GameProps {
    fn timing(&self) -> game::EngineConfig {
        self.cooldown_ms
            .map_or_else(game::EngineConfig::default, |millis| {
                game::EngineConfig::with_cooldown(Duration::from_millis(millis))
            })
    }
}

#[derive(Debug)]
pub(crate) struct GameView {
    settings: Settings,
    theme: Option<Theme>,
    leaderboard: game::Leaderboard,
    session: Option<GameSession>,
    sound: SoundPlayer,
    timing: game::EngineConfig,
    seed: Option<u64>,
    deals: u64,
    clock: Option<String>,
    notice: Option<AttrValue>,
    _timer_interval: Interval,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(TICK_MILLIS, move || link.send_message(Msg::Tick))
    }

    fn next_seed(&mut self) -> u64 {
        let deal = self.deals;
        self.deals += 1;
        self.seed
            .map_or_else(js_random_seed, |seed| seed.wrapping_add(deal))
    }

    fn deal(&mut self) {
        let seed = self.next_seed();
        log::debug!("dealing {:?} with seed {}", self.settings.difficulty, seed);
        self.session = match GameSession::deal(&self.settings, seed, self.timing) {
            Ok(session) => Some(session),
            Err(err) => {
                log::error!("could not deal a game: {}", err);
                None
            }
        };
        self.clock = None;
    }

    fn refresh_clock(&mut self, now: game::Millis) -> bool {
        let clock = self.session.as_ref().and_then(|session| session.clock_text(now));
        if clock != self.clock {
            self.clock = clock;
            true
        } else {
            false
        }
    }

    /// Feeds queued engine events to the audio player and the leaderboard.
    fn dispatch_events(&mut self) {
        let events = match self.session.as_mut() {
            Some(session) => session.engine.take_events(),
            None => return,
        };

        let mut completed = false;
        for event in &events {
            log::trace!("event: {:?}", event);
            if self.settings.sound_enabled {
                if let Some(cue) = game::SoundCue::for_event(event) {
                    self.sound.play(cue);
                }
            }
            completed |= event.is_completion();
        }

        if completed {
            self.submit_score();
        }
    }

    fn submit_score(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(record) = session.take_score(&local_timestamp()) else {
            log::debug!("no score to submit");
            return;
        };
        log::debug!("score submitted for {}: {} moves", record.name, record.moves);
        // another tab may have written since we loaded
        self.leaderboard = leaderboard::load();
        self.leaderboard.submit(record);
        leaderboard::save(&self.leaderboard);
    }

    fn reveal(&mut self, index: game::CellIndex) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        match session.engine.reveal(index, now_millis()) {
            Ok(outcome) => {
                log::debug!("reveal {}: {:?}", index, outcome);
                self.dispatch_events();
                outcome.has_update()
            }
            Err(err) => {
                log::trace!("reveal {} rejected: {}", index, err);
                false
            }
        }
    }

    fn tick(&mut self) -> bool {
        let now = now_millis();
        let resolved = self
            .session
            .as_mut()
            .is_some_and(|session| session.engine.resolve_cooldown(now).has_update());
        if resolved {
            self.dispatch_events();
        }
        self.refresh_clock(now) || resolved
    }

    fn view_stats(&self, session: &GameSession) -> Html {
        let engine = &session.engine;
        let roster = engine.roster();
        let progress = format!("width: {:.1}%", engine.progress_percent());

        let counters = if session.is_solo() {
            html! {
                <div class="counters">
                    <div>{format!("🎯 Moves: {}", engine.moves())}</div>
                    <div>{format!("✅ Matches: {}/{}", engine.matched_pairs(), engine.num_pairs())}</div>
                </div>
            }
        } else {
            html! {
                <div class="counters">
                    <div>
                        {format!(
                            "🎯 Moves: {} | Current Player: {}",
                            engine.moves(),
                            roster.display_name(engine.current_player())
                        )}
                    </div>
                    <div>{format!("Scores: {}", session.scores_text())}</div>
                </div>
            }
        };

        html! {
            <section class="stats">
                <h3>{format!("Difficulty: {}", session.difficulty.label())}</h3>
                <div class="progress">
                    <div class="progress-bar" style={progress}/>
                </div>
                <div class="progress-text">{session.progress_text()}</div>
                {counters}
            </section>
        }
    }

    fn view_personal_best(&self, session: &GameSession) -> Html {
        if !session.is_solo() {
            return html! {};
        }
        let name = self.settings.solo_name.trim();
        if name.is_empty() {
            return html! {};
        }
        match self.leaderboard.personal_best(name, session.difficulty.label()) {
            Some(best) => html! {
                <p class="notice info">
                    {format!("🏅 Your Best: {} moves on {}", best.moves, best.timestamp)}
                </p>
            },
            None => html! {},
        }
    }

    fn view_board(&self, ctx: &Context<Self>, session: &GameSession) -> Html {
        let engine = &session.engine;
        let size = engine.config().size;
        let (rows, cols) = size;
        let accepts_reveal = engine.state().accepts_reveal();

        let card = |index: game::CellIndex| {
            let state = engine.card_at(index).unwrap_or_default();
            let face = match engine.face_at(index) {
                Some(symbol) if state.is_face_up() => symbol.glyph(),
                _ => HIDDEN_FACE,
            };
            let locked = !accepts_reveal || state != game::CardState::Hidden;
            let callback = ctx.link().callback(Msg::Reveal);
            html! {
                <CardView {index} {state} {face} {locked} {callback}/>
            }
        };

        html! {
            <table class={classes!("board", accepts_reveal.then_some("playable"))}>
                {
                    for (0..rows).map(|row| html! {
                        <tr>
                            {
                                for (0..cols)
                                    .filter_map(|col| game::coords_to_index((row, col), size))
                                    .map(&card)
                            }
                        </tr>
                    })
                }
            </table>
        }
    }

    fn view_summary(&self, session: &GameSession) -> Html {
        let engine = &session.engine;
        if !engine.is_game_over() {
            return html! {};
        }
        html! {
            <div class="metrics">
                <div><small>{"Total Moves"}</small><strong>{engine.moves().to_string()}</strong></div>
                <div><small>{"Efficiency"}</small><strong>{session.efficiency_text()}</strong></div>
                <div><small>{"Time"}</small><strong>{self.clock.clone().unwrap_or_default()}</strong></div>
            </div>
        }
    }

    fn view_game(&self, ctx: &Context<Self>) -> Html {
        let Some(session) = self.session.as_ref() else {
            return html! {
                <p class="notice warning">{"Could not deal a game with these settings."}</p>
            };
        };

        html! {
            <>
                <h1>{session.header_text()}</h1>
                {view_rules()}
                {self.view_stats(session)}
                {self.view_personal_best(session)}
                {self.view_board(ctx, session)}
                <div class="status">
                    {
                        for session.status_lines().iter().map(|line| html! {
                            <p class={classes!("notice", line.class())}>{line.text().to_string()}</p>
                        })
                    }
                </div>
                {self.view_summary(session)}
            </>
        }
    }
}

fn view_rules() -> Html {
    html! {
        <details class="rules">
            <summary>{"📜 Game Rules"}</summary>
            <h3>{"🎮 Solo Mode Rules"}</h3>
            <ul>
                <li>{"Flip two cards at a time to find matching pairs."}</li>
                <li>{"The game ends when all pairs are matched."}</li>
                <li>{"Your performance is scored by number of moves."}</li>
                <li>{"Try to beat your personal best and climb the leaderboard!"}</li>
            </ul>
            <h3>{"🧑‍🤝‍🧑 Multiplayer Mode Rules"}</h3>
            <ul>
                <li>{"Two or more players take turns flipping two cards."}</li>
                <li>{"If a player finds a match, they earn a point and take another turn."}</li>
                <li>{"If the cards don't match, the next player takes their turn."}</li>
                <li>{"The game ends when all pairs are matched."}</li>
                <li>{"The player with the most matched pairs wins!"}</li>
            </ul>
        </details>
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let settings = Settings::load();

        // a forced seed always deals fresh so the board is reproducible
        let stored: Option<GameSession> = LocalOrDefault::local_or_default();
        let timing = props.timing();
        let session = stored.filter(|session| props.seed.is_none() && session.can_resume(&settings, timing));

        let mut view = Self {
            settings,
            theme: Theme::stored(),
            leaderboard: leaderboard::load(),
            session,
            sound: SoundPlayer::default(),
            timing,
            seed: props.seed,
            deals: 0,
            clock: None,
            notice: None,
            _timer_interval: GameView::create_timer(ctx),
        };

        if view.session.is_some() {
            log::debug!("resuming stored game");
            view.refresh_clock(now_millis());
        } else {
            view.deal();
        }
        view.session.local_save();
        view
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            Reveal(index) => {
                let had_notice = self.notice.take().is_some();
                let revealed = self.reveal(index);
                self.refresh_clock(now_millis());
                revealed || had_notice
            }
            Tick => self.tick(),
            NewGame => {
                log::debug!("new game requested");
                self.notice = None;
                self.deal();
                true
            }
            UpdateSettings(settings) => {
                if self.settings != settings {
                    let restart = self
                        .session
                        .as_ref()
                        .is_none_or(|session| !session.matches_settings(&settings));
                    self.settings = settings;
                    self.settings.save();
                    if restart {
                        log::debug!("game settings changed, dealing a new game");
                        self.notice = None;
                        self.deal();
                    }
                    true
                } else {
                    false
                }
            }
            ApplyTheme(theme) => {
                if self.theme != theme {
                    self.theme = theme;
                    Theme::apply(theme);
                    true
                } else {
                    false
                }
            }
            ClearLeaderboard => {
                log::debug!("clearing leaderboard");
                self.leaderboard.clear();
                leaderboard::save(&self.leaderboard);
                self.deal();
                self.notice = Some("Leaderboard cleared and game restarted!".into());
                true
            }
        };

        if updated {
            self.session.local_save();
        }
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let difficulty = self
            .session
            .as_ref()
            .map_or(self.settings.difficulty, |session| session.difficulty);
        let entries: Vec<game::ScoreRecord> = self
            .leaderboard
            .top(difficulty.label(), game::Leaderboard::DEFAULT_TOP)
            .into_iter()
            .cloned()
            .collect();

        let cb_new_game = ctx.link().callback(|_: MouseEvent| NewGame);

        html! {
            <div class="concentration">
                <SettingsView
                    settings={self.settings.clone()}
                    theme={self.theme}
                    notice={self.notice.clone()}
                    on_change={ctx.link().callback(UpdateSettings)}
                    on_theme={ctx.link().callback(ApplyTheme)}
                    on_clear_leaderboard={ctx.link().callback(|_: ()| ClearLeaderboard)}
                />
                <main>
                    {self.view_game(ctx)}
                    <button class="new-game" onclick={cb_new_game}>{"🔄 New Game"}</button>
                    <hr/>
                    <LeaderboardView {entries}/>
                </main>
            </div>
        }
    }
}
