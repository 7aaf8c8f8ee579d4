use crate::utils::*;
use bitflags::bitflags;
use chrono::prelude::*;
use clap::Args;
use gloo::timers::callback::Interval;
use lightsout_core as game;
use serde::{Deserialize, Serialize};
use yew::prelude::*;

fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameSession {
    pub engine: game::PlayEngine,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub move_count: u32,
}

impl GameSession {
    fn new(engine: game::PlayEngine) -> Self {
        Self {
            engine,
            started_at: None,
            ended_at: None,
            move_count: 0,
        }
    }

    fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or(now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    /// Flips around `coords`, returns whether anything changed.
    fn flip(&mut self, coords: game::Coord2, now: DateTime<Utc>) -> bool {
        match self.engine.flip(coords) {
            Ok(outcome) => {
                self.on_successful_move(now);
                if outcome.is_win() {
                    log::info!("won after {} moves", self.move_count);
                }
                true
            }
            Err(err) => {
                log::debug!("flip at {:?} ignored: {}", coords, err);
                false
            }
        }
    }

    fn on_successful_move(&mut self, now: DateTime<Utc>) {
        self.move_count = self.move_count.saturating_add(1);

        if self.started_at.is_none() {
            self.started_at = Some(now);
        }

        if self.engine.is_finished() && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct MouseButtons: u16 {
        const LEFT    = 1;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
        const BACK    = 1 << 3;
        const FORWARD = 1 << 4;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct CellPointerState {
    pos: game::Coord2,
    buttons: MouseButtons,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum CellMsg {
    Update(CellPointerState),
    Leave,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Msg {
    CellEvent(CellMsg),
    UpdateTime,
}

/// A left press released over the same cell flips around it, anything else is a cancel.
fn released_flip_target(
    pressed: CellPointerState,
    released: CellPointerState,
) -> Option<game::Coord2> {
    match pressed {
        CellPointerState {
            pos,
            buttons: MouseButtons::LEFT,
        } if pos == released.pos => Some(pos),
        _ => None,
    }
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    y: game::Coord,
    x: game::Coord,
    lit: bool,
    #[prop_or_default]
    pressed: bool,
    callback: Callback<CellMsg>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        y,
        x,
        lit,
        pressed,
        callback,
    } = props.clone();

    let mut class = classes!("cell");
    if lit {
        class.push("lit");
    }
    if pressed {
        class.push("pressed");
    }

    let onmousedown = {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            let pointer_state = CellPointerState {
                pos: (y, x),
                buttons,
            };
            callback.emit(CellMsg::Update(pointer_state));
            log::trace!("({}, {}) mouse down ({:?})", y, x, buttons);
        })
    };

    let onmouseup = {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            let pointer_state = CellPointerState {
                pos: (y, x),
                buttons,
            };
            callback.emit(CellMsg::Update(pointer_state));
            log::trace!("({}, {}) mouse up ({:?})", y, x, buttons);
        })
    };

    let onmouseleave = {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            callback.emit(CellMsg::Leave);
            log::trace!("({}, {}) mouse leave ({:?})", y, x, buttons);
        })
    };

    html! {
        <td {class} {onmousedown} {onmouseup} {onmouseleave}/>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Number of rows on the board
    #[arg(long, default_value_t = game::GameConfig::DEFAULT_ROWS)]
    pub(crate) rows: game::Coord,

    /// Number of columns on the board
    #[arg(long, default_value_t = game::GameConfig::DEFAULT_COLS)]
    pub(crate) cols: game::Coord,

    /// Chance that any light starts on
    #[arg(long, default_value_t = game::GameConfig::DEFAULT_CHANCE)]
    pub(crate) chance: f64,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,
}

impl GameProps {
    pub(crate) fn config(&self) -> game::GameConfig {
        game::GameConfig::new((self.rows, self.cols), self.chance)
    }
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: GameSession,
    prev_time: u32,
    current_cell_state: Option<CellPointerState>,
    _timer_interval: Interval,
}

impl GameView {
    fn create_session(props: &GameProps) -> GameSession {
        use game::BoardGenerator;

        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);
        let board = game::RandomBoardGenerator::new(seed).generate(props.config());
        GameSession::new(game::PlayEngine::new(board))
    }

    fn get_time(&self) -> u32 {
        self.session.elapsed_secs(utc_now())
    }

    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(500, move || link.send_message(Msg::UpdateTime))
    }

    fn is_pressed(&self, coords: game::Coord2) -> bool {
        matches!(
            self.current_cell_state,
            Some(CellPointerState {
                pos,
                buttons: MouseButtons::LEFT,
            }) if pos == coords
        )
    }

    fn view_won(&self) -> Html {
        let moves = self.session.move_count;
        let secs = self.get_time();

        html! {
            <div class="lightsout won">
                <h2>{"You won!"}</h2>
                <p>{format!("{} moves in {} seconds", moves, secs)}</p>
            </div>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            session: GameView::create_session(ctx.props()),
            prev_time: 0,
            current_cell_state: None,
            _timer_interval: GameView::create_timer(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use CellMsg::*;
        use Msg::*;

        match msg {
            CellEvent(Leave) => {
                log::trace!("cell leave");
                self.current_cell_state.take().is_some()
            }
            CellEvent(Update(cell_state)) => {
                log::trace!("cell update: {:?}", cell_state);
                if cell_state.buttons.is_empty() {
                    let Some(pressed) = self.current_cell_state.take() else {
                        return false;
                    };
                    if let Some(pos) = released_flip_target(pressed, cell_state) {
                        log::debug!("flip around: {:?}", pos);
                        self.session.flip(pos, utc_now());
                    }
                    // the pressed cell is redrawn as released even when no flip happened
                    true
                } else {
                    self.current_cell_state.replace(cell_state) != Some(cell_state)
                }
            }
            UpdateTime => {
                let time = self.get_time();
                if self.prev_time != time {
                    self.prev_time = time;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if self.session.engine.is_finished() {
            return self.view_won();
        }

        let (rows, cols) = self.session.engine.size();
        let moves = format_for_counter(self.session.move_count);
        let elapsed_time = format_for_counter(self.get_time());

        html! {
            <div class="lightsout" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <nav>
                    <aside>{moves}</aside>
                    <aside>{elapsed_time}</aside>
                </nav>
                <table class="board">
                    {
                        for (0..rows).map(|y| html! {
                            <tr>
                                {
                                    for (0..cols).map(|x| {
                                        let pos = (y, x);
                                        let lit = self.session.engine.is_lit(pos);
                                        let pressed = self.is_pressed(pos);
                                        let callback = ctx.link().callback(Msg::CellEvent);
                                        html! {
                                            <CellView {y} {x} {lit} {callback} {pressed}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(secs, 0).unwrap()
    }

    fn session(board: &str) -> GameSession {
        GameSession::new(game::PlayEngine::new(board.parse().unwrap()))
    }

    #[test]
    fn first_flip_starts_the_clock() {
        let mut session = session("O.\n..");

        assert_eq!(session.elapsed_secs(t(5)), 0);
        assert!(session.flip((1, 1), t(10)));

        assert_eq!(session.move_count, 1);
        assert_eq!(session.started_at, Some(t(10)));
        assert_eq!(session.elapsed_secs(t(13)), 3);
        assert_eq!(session.ended_at, None);
    }

    #[test]
    fn winning_flip_stops_the_clock() {
        let mut session = session(".O.\nOOO\n.O.");

        assert!(session.flip((0, 0), t(0)));
        assert!(session.flip((0, 0), t(4)));
        assert!(session.flip((1, 1), t(9)));

        assert_eq!(session.engine.state(), game::GameState::Won);
        assert_eq!(session.move_count, 3);
        assert_eq!(session.ended_at, Some(t(9)));
        assert_eq!(session.elapsed_secs(t(100)), 9);
    }

    #[test]
    fn rejected_flips_are_not_counted() {
        let mut session = session("O");

        assert!(session.flip((0, 0), t(1)));
        assert!(!session.flip((0, 0), t(2)));
        assert!(!session.flip((3, 3), t(3)));

        assert_eq!(session.move_count, 1);
    }

    fn pointer(pos: game::Coord2, buttons: MouseButtons) -> CellPointerState {
        CellPointerState { pos, buttons }
    }

    #[test]
    fn left_release_on_pressed_cell_flips_it() {
        let pressed = pointer((1, 2), MouseButtons::LEFT);

        assert_eq!(
            released_flip_target(pressed, pointer((1, 2), MouseButtons::empty())),
            Some((1, 2))
        );
    }

    #[test]
    fn release_elsewhere_or_other_buttons_cancel() {
        let released = pointer((0, 0), MouseButtons::empty());

        assert_eq!(
            released_flip_target(pointer((0, 1), MouseButtons::LEFT), released),
            None
        );
        assert_eq!(
            released_flip_target(pointer((0, 0), MouseButtons::RIGHT), released),
            None
        );
        assert_eq!(
            released_flip_target(
                pointer((0, 0), MouseButtons::LEFT | MouseButtons::RIGHT),
                released
            ),
            None
        );
    }

    #[test]
    fn props_clamp_into_a_valid_config() {
        let props = GameProps {
            rows: 0,
            cols: 4,
            chance: 2.0,
            seed: Some(1),
        };

        assert_eq!(
            props.config(),
            game::GameConfig::new_unchecked((1, 4), 1.0)
        );
    }
}
