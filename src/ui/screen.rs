use ratatui::Frame;

use keytrainer::navigation::{Navigator, Screen as ActiveScreen};

use super::{
    history::render_history, render_attempt, render_menu_screen, render_path_prompt,
    render_result, render_task_form, render_task_info,
};

/// A UI Screen boundary: responsible for rendering one navigation state
pub trait Screen {
    fn render(&self, nav: &Navigator, f: &mut Frame);
}

/// Main menu and user-task selection: a title over a list of items
pub struct MenuScreen {
    title: &'static str,
}

impl Screen for MenuScreen {
    fn render(&self, nav: &Navigator, f: &mut Frame) {
        let cursor = match nav.screen() {
            ActiveScreen::Menu(menu) | ActiveScreen::TaskSelect(menu) => menu.cursor,
            _ => 0,
        };
        render_menu_screen(self.title, &nav.menu_items(), cursor, f);
    }
}

pub struct TaskCreateScreen;

impl Screen for TaskCreateScreen {
    fn render(&self, nav: &Navigator, f: &mut Frame) {
        if let ActiveScreen::TaskCreate(form) = nav.screen() {
            render_task_form(form, &nav.menu_items(), f);
        }
    }
}

pub struct PathPromptScreen;

impl Screen for PathPromptScreen {
    fn render(&self, nav: &Navigator, f: &mut Frame) {
        if let ActiveScreen::PathPrompt(prompt) = nav.screen() {
            render_path_prompt(prompt, f);
        }
    }
}

pub struct TaskInfoScreen;

impl Screen for TaskInfoScreen {
    fn render(&self, nav: &Navigator, f: &mut Frame) {
        if let ActiveScreen::TaskInfo { task, menu } = nav.screen() {
            render_task_info(task, &nav.menu_items(), menu.cursor, f);
        }
    }
}

/// Countdown, typing and pause all live on the attempt screen
pub struct AttemptScreen;

impl Screen for AttemptScreen {
    fn render(&self, nav: &Navigator, f: &mut Frame) {
        if let ActiveScreen::Attempt(view) = nav.screen() {
            render_attempt(view, &nav.menu_items(), f);
        }
    }
}

pub struct ResultScreen;

impl Screen for ResultScreen {
    fn render(&self, nav: &Navigator, f: &mut Frame) {
        if let ActiveScreen::Result(view) = nav.screen() {
            render_result(view, &nav.menu_items(), f);
        }
    }
}

pub struct StatsScreen;

impl Screen for StatsScreen {
    fn render(&self, nav: &Navigator, f: &mut Frame) {
        if let ActiveScreen::Stats(view) = nav.screen() {
            render_history(view, &nav.menu_items(), f);
        }
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &ActiveScreen) -> Box<dyn Screen> {
    match state {
        ActiveScreen::Menu(_) => Box::new(MenuScreen {
            title: "Keyboard Trainer",
        }),
        ActiveScreen::TaskSelect(_) => Box::new(MenuScreen { title: "User tasks" }),
        ActiveScreen::TaskCreate(_) => Box::new(TaskCreateScreen),
        ActiveScreen::PathPrompt(_) => Box::new(PathPromptScreen),
        ActiveScreen::TaskInfo { .. } => Box::new(TaskInfoScreen),
        ActiveScreen::Attempt(_) => Box::new(AttemptScreen),
        ActiveScreen::Result(_) => Box::new(ResultScreen),
        ActiveScreen::Stats(_) => Box::new(StatsScreen),
    }
}
