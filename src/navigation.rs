use crate::attempt::{Attempt, Phase};
use crate::attempt_log::{AttemptLog, LogEntry};
use crate::config::Config;
use crate::language::LanguageError;
use crate::scoring::ScoreResult;
use crate::task::Task;
use crate::word_generator::TextGenerator;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, info, warn};
use std::mem;
use std::time::Duration;

/// Input fields on the task creation form before its buttons
pub const FORM_FIELDS: usize = 2;
const MAX_FIELD_DIGITS: usize = 6;

/// What an attempt is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Timed { secs: u64 },
    Task(Task),
}

impl Mode {
    pub fn time_limit_secs(&self) -> u64 {
        match self {
            Mode::Timed { secs } => *secs,
            Mode::Task(task) => task.time_limit_seconds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    ToMenu,
    ToTask,
    ToStats,
    Restart,
    Continue,
    StartTimed(u64),
    StartTask(Task),
    ShowTask(Task),
    /// Open the task form; coming back from a save prompt keeps the typed values
    CreateTask,
    LoadTask,
    SaveTask(Task),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    /// `None` renders the item disabled
    pub event: Option<NavEvent>,
}

impl MenuItem {
    fn new(label: impl Into<String>, event: NavEvent) -> Self {
        Self {
            label: label.into(),
            event: Some(event),
        }
    }

    fn maybe(label: impl Into<String>, event: Option<NavEvent>) -> Self {
        Self {
            label: label.into(),
            event,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuView {
    pub cursor: usize,
}

impl MenuView {
    fn next(&mut self, len: usize) {
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    fn prev(&mut self, len: usize) {
        if len > 0 {
            self.cursor = (self.cursor + len - 1) % len;
        }
    }

    fn selected(&self, items: &[MenuItem]) -> Option<NavEvent> {
        items.get(self.cursor).and_then(|item| item.event.clone())
    }

    fn on_key(&mut self, key: KeyEvent, items: &[MenuItem], back: NavEvent) -> Option<NavEvent> {
        match key.code {
            KeyCode::Up | KeyCode::BackTab => self.prev(items.len()),
            KeyCode::Down | KeyCode::Tab => self.next(items.len()),
            KeyCode::Enter => return self.selected(items),
            KeyCode::Esc => return Some(back),
            _ => {}
        }
        None
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub speed: String,
    pub time: String,
    /// `0..FORM_FIELDS` are the input fields, the rest index the buttons
    pub focus: usize,
}

impl TaskForm {
    /// The entered task, if both fields hold numbers and the time limit is positive
    pub fn task(&self) -> Option<Task> {
        let time = self.time.parse::<u64>().ok().filter(|t| *t > 0)?;
        let speed = self.speed.parse::<u32>().ok()?;
        Some(Task::new(time, speed))
    }

    fn focused_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            0 => Some(&mut self.speed),
            1 => Some(&mut self.time),
            _ => None,
        }
    }

    fn on_key(&mut self, key: KeyEvent, buttons: &[MenuItem]) -> Option<NavEvent> {
        let slots = FORM_FIELDS + buttons.len();
        match key.code {
            KeyCode::Up | KeyCode::BackTab => self.focus = (self.focus + slots - 1) % slots,
            KeyCode::Down | KeyCode::Tab => self.focus = (self.focus + 1) % slots,
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(field) = self.focused_field_mut() {
                    if field.len() < MAX_FIELD_DIGITS {
                        field.push(c);
                    }
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.focused_field_mut() {
                    field.pop();
                }
            }
            KeyCode::Enter if self.focus < FORM_FIELDS => self.focus += 1,
            KeyCode::Enter => {
                return buttons
                    .get(self.focus - FORM_FIELDS)
                    .and_then(|b| b.event.clone())
            }
            KeyCode::Esc => return Some(NavEvent::ToTask),
            _ => {}
        }
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPurpose {
    Load,
    Save { task: Task, form: TaskForm },
}

/// Typed file path; stands in for an open/save dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrompt {
    pub purpose: PathPurpose,
    pub input: String,
}

impl PathPrompt {
    fn cancel_event(&self) -> NavEvent {
        match self.purpose {
            PathPurpose::Load => NavEvent::ToTask,
            PathPurpose::Save { .. } => NavEvent::CreateTask,
        }
    }

    fn submit(&self) -> NavEvent {
        let path = self.input.trim();
        if path.is_empty() {
            return self.cancel_event();
        }

        match &self.purpose {
            PathPurpose::Load => match Task::load(path) {
                Ok(task) => {
                    info!("loaded task from {}: {:?}", path, task);
                    NavEvent::ShowTask(task)
                }
                Err(e) => {
                    warn!("task selection cancelled: {}", e);
                    NavEvent::ToTask
                }
            },
            PathPurpose::Save { task, .. } => {
                match task.save(path) {
                    Ok(()) => info!("saved task to {}", path),
                    Err(e) => warn!("unable to save task to {}: {}", path, e),
                }
                NavEvent::CreateTask
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Option<NavEvent> {
        match key.code {
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => return Some(self.submit()),
            KeyCode::Esc => return Some(self.cancel_event()),
            _ => {}
        }
        None
    }
}

#[derive(Debug, Clone)]
pub struct AttemptView {
    pub attempt: Attempt,
    pub mode: Mode,
    /// Pause screen menu
    pub menu: MenuView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub mode: Mode,
    pub score: ScoreResult,
    /// Task mode only: whether the target speed was reached
    pub task_met: Option<bool>,
    pub menu: MenuView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsView {
    pub entries: Vec<LogEntry>,
    pub menu: MenuView,
}

/// The active screen and everything it shows; replaced wholesale on navigation
#[derive(Debug, Clone)]
pub enum Screen {
    Menu(MenuView),
    TaskSelect(MenuView),
    TaskCreate(TaskForm),
    PathPrompt(PathPrompt),
    TaskInfo { task: Task, menu: MenuView },
    Attempt(AttemptView),
    Result(ResultView),
    Stats(StatsView),
}

impl Screen {
    fn menu() -> Self {
        Screen::Menu(MenuView::default())
    }

    fn mode(&self) -> Option<Mode> {
        match self {
            Screen::Attempt(view) => Some(view.mode),
            Screen::Result(view) => Some(view.mode),
            _ => None,
        }
    }

    fn menu_mut(&mut self) -> Option<&mut MenuView> {
        match self {
            Screen::Menu(menu) | Screen::TaskSelect(menu) => Some(menu),
            Screen::TaskInfo { menu, .. } => Some(menu),
            Screen::Attempt(view) => Some(&mut view.menu),
            Screen::Result(view) => Some(&mut view.menu),
            Screen::Stats(view) => Some(&mut view.menu),
            Screen::TaskCreate(_) | Screen::PathPrompt(_) => None,
        }
    }

    fn back_event(&self) -> NavEvent {
        match self {
            Screen::Menu(_) => NavEvent::Quit,
            _ => NavEvent::ToMenu,
        }
    }
}

/// Owns the active screen and dispatches navigation events
#[derive(Debug)]
pub struct Navigator {
    config: Config,
    generator: TextGenerator,
    attempt_log: AttemptLog,
    screen: Screen,
    should_quit: bool,
    /// Set when the latest tick ended the attempt; the key of the same step is dropped
    finished_on_tick: bool,
}

impl Navigator {
    pub fn new(config: Config, attempt_log: AttemptLog) -> Result<Self, LanguageError> {
        let language = config.language.as_lang()?;
        let generator = TextGenerator::new(language, config.word_count);
        Ok(Self::with_generator(config, generator, attempt_log))
    }

    pub fn with_generator(config: Config, generator: TextGenerator, attempt_log: AttemptLog) -> Self {
        Self {
            config,
            generator,
            attempt_log,
            screen: Screen::menu(),
            should_quit: false,
            finished_on_tick: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Selectable items of the active screen, in display order
    pub fn menu_items(&self) -> Vec<MenuItem> {
        match &self.screen {
            Screen::Menu(_) => {
                let mut items: Vec<MenuItem> = self
                    .config
                    .time_limits
                    .iter()
                    .map(|&secs| MenuItem::new(format!("{} sec", secs), NavEvent::StartTimed(secs)))
                    .collect();
                items.push(MenuItem::new("user mode", NavEvent::ToTask));
                items.push(MenuItem::new("statistics", NavEvent::ToStats));
                items.push(MenuItem::new("exit", NavEvent::Quit));
                items
            }
            Screen::TaskSelect(_) => vec![
                MenuItem::new("create task", NavEvent::CreateTask),
                MenuItem::new("upload task", NavEvent::LoadTask),
                MenuItem::new("menu", NavEvent::ToMenu),
            ],
            Screen::TaskCreate(form) => {
                let task = form.task();
                vec![
                    MenuItem::maybe("go!", task.map(NavEvent::StartTask)),
                    MenuItem::maybe("save to file", task.map(NavEvent::SaveTask)),
                    MenuItem::new("menu", NavEvent::ToMenu),
                ]
            }
            Screen::TaskInfo { task, .. } => vec![
                MenuItem::new("start", NavEvent::StartTask(*task)),
                MenuItem::new("menu", NavEvent::ToMenu),
            ],
            Screen::Attempt(view) if view.attempt.phase() == Phase::Paused => vec![
                MenuItem::new("continue", NavEvent::Continue),
                MenuItem::new("menu", NavEvent::ToMenu),
                MenuItem::new("exit", NavEvent::Quit),
            ],
            Screen::Result(_) => vec![
                MenuItem::new("menu", NavEvent::ToMenu),
                MenuItem::new("restart", NavEvent::Restart),
                MenuItem::new("exit", NavEvent::Quit),
            ],
            Screen::Stats(_) => vec![MenuItem::new("menu", NavEvent::ToMenu)],
            Screen::Attempt(_) | Screen::PathPrompt(_) => Vec::new(),
        }
    }

    /// Replace the active screen according to `event`
    pub fn navigate(&mut self, event: NavEvent) {
        debug!("navigate: {:?}", event);
        let previous = mem::replace(&mut self.screen, Screen::menu());

        self.screen = match event {
            NavEvent::ToMenu => Screen::menu(),
            NavEvent::ToTask => Screen::TaskSelect(MenuView::default()),
            NavEvent::ToStats => Screen::Stats(StatsView {
                entries: self.attempt_log.last(self.config.history_len),
                menu: MenuView::default(),
            }),
            NavEvent::StartTimed(secs) => self.start_attempt(Mode::Timed { secs }),
            NavEvent::StartTask(task) => self.start_attempt(Mode::Task(task)),
            NavEvent::ShowTask(task) => Screen::TaskInfo {
                task,
                menu: MenuView::default(),
            },
            NavEvent::CreateTask => match previous {
                Screen::PathPrompt(PathPrompt {
                    purpose: PathPurpose::Save { form, .. },
                    ..
                }) => Screen::TaskCreate(form),
                _ => Screen::TaskCreate(TaskForm::default()),
            },
            NavEvent::LoadTask => Screen::PathPrompt(PathPrompt {
                purpose: PathPurpose::Load,
                input: String::new(),
            }),
            NavEvent::SaveTask(task) => match previous {
                Screen::TaskCreate(form) => Screen::PathPrompt(PathPrompt {
                    purpose: PathPurpose::Save { task, form },
                    input: String::new(),
                }),
                other => other,
            },
            NavEvent::Restart => match previous.mode() {
                Some(mode) => self.start_attempt(mode),
                None => previous,
            },
            NavEvent::Continue => match previous {
                Screen::Attempt(mut view) => {
                    view.attempt.resume();
                    view.menu = MenuView::default();
                    Screen::Attempt(view)
                }
                other => other,
            },
            NavEvent::Quit => {
                self.should_quit = true;
                previous
            }
        };

        self.finish_if_done();
    }

    /// Advance the running attempt, if any, by `delta`
    pub fn on_tick(&mut self, delta: Duration) {
        self.finished_on_tick = false;
        if let Screen::Attempt(view) = &mut self.screen {
            view.attempt.on_tick(delta);
            self.finished_on_tick = view.attempt.has_finished();
        }
        self.finish_if_done();
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.navigate(NavEvent::Quit);
            return;
        }

        // a key typed as the clock ran out must not act on the result menu
        if mem::take(&mut self.finished_on_tick) && matches!(self.screen, Screen::Result(_)) {
            debug!("dropping {:?}: attempt ended on the same tick", key.code);
            return;
        }

        let items = self.menu_items();
        let back = self.screen.back_event();

        let event = match &mut self.screen {
            Screen::Attempt(view) if view.attempt.phase() != Phase::Paused => {
                let chord = key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER);
                match key.code {
                    KeyCode::Char(_) if chord => {
                        debug!("ignoring chord {:?} {:?}", key.modifiers, key.code);
                        None
                    }
                    KeyCode::Char(c) => {
                        view.attempt.on_key(c);
                        None
                    }
                    KeyCode::Enter => {
                        view.attempt.on_key('\n');
                        None
                    }
                    KeyCode::Esc if matches!(view.attempt.phase(), Phase::Countdown { .. }) => {
                        Some(NavEvent::ToMenu)
                    }
                    KeyCode::Esc => {
                        view.attempt.pause();
                        None
                    }
                    _ => None,
                }
            }
            Screen::TaskCreate(form) => form.on_key(key, &items),
            Screen::PathPrompt(prompt) => prompt.on_key(key),
            screen => screen
                .menu_mut()
                .and_then(|menu| menu.on_key(key, &items, back)),
        };

        if let Some(event) = event {
            self.navigate(event);
        }
        self.finish_if_done();
    }

    fn start_attempt(&self, mode: Mode) -> Screen {
        let text = self.generator.generate();
        let mut attempt = Attempt::new(
            &text,
            Duration::from_secs(mode.time_limit_secs()),
            self.config.countdown(),
        )
        .with_policy(self.config.lookalikes.clone());
        attempt.start();
        info!("attempt started: {:?}", mode);

        Screen::Attempt(AttemptView {
            attempt,
            mode,
            menu: MenuView::default(),
        })
    }

    fn finish_if_done(&mut self) {
        if !matches!(&self.screen, Screen::Attempt(view) if view.attempt.has_finished()) {
            return;
        }
        let Screen::Attempt(view) = mem::replace(&mut self.screen, Screen::menu()) else {
            return;
        };

        let score = view.attempt.score();
        let task_met = match view.mode {
            Mode::Task(task) => Some(task.is_met(&score)),
            Mode::Timed { .. } => None,
        };
        info!(
            "attempt finished: {:?} speed={} wpm accuracy={}%",
            view.mode, score.speed_wpm, score.accuracy_pct
        );

        let entry = LogEntry::new(view.mode.time_limit_secs(), score);
        if let Err(e) = self.attempt_log.append(&entry) {
            warn!(
                "unable to record attempt in {}: {}",
                self.attempt_log.path().display(),
                e
            );
        }

        self.screen = Screen::Result(ResultView {
            mode: view.mode,
            score,
            task_met,
            menu: MenuView::default(),
        });
    }
}
