mod app;
mod config;
mod core;
mod models;
mod system;
mod ui;
mod utils;

use app::App;
use clap::Parser;
use config::Settings;
use core::commands::find_command;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use ui::{FolderPane, InfoBar, LayoutMode, PreviewPane, PromptBox, WarningScreen};
use utils::error::Result;

/// 세 칸 터미널 파일 관리자
#[derive(Parser, Debug)]
#[command(name = "tfm", version, about)]
struct Cli {
    /// 시작 디렉토리 (기본값: 현재 디렉토리)
    path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let start = match resolve_start(cli.path) {
        Ok(path) => path,
        Err(err) => {
            eprintln!("tfm: {}", err);
            std::process::exit(2);
        }
    };

    // 로그는 TFM_LOG가 있을 때만 파일로
    if let Err(err) = utils::logging::init() {
        eprintln!("tfm: logging disabled ({:#})", err);
    }
    let (settings, notice) = Settings::load();
    tracing::info!(start = %start.display(), "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let res = start_app(&mut terminal, &start, settings, notice);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "exited with error");
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// 시작 경로 검증 (디렉토리가 아니면 실행하지 않는다)
fn resolve_start(path: Option<PathBuf>) -> Result<PathBuf> {
    let path = match path {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let absolute = std::fs::canonicalize(&path)
        .map_err(|e| utils::error::TfmError::from_io(e, &path))?;
    if !absolute.is_dir() {
        return Err(utils::error::TfmError::NotADirectory { path: absolute });
    }
    Ok(absolute)
}

fn start_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    start: &Path,
    settings: Settings,
    notice: Option<String>,
) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(start, settings, notice, (size.width, size.height))?;
    run_app(terminal, &mut app)
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // 레이아웃 크기가 터미널과 다르면 목록 용량부터 맞춘다
        let size = terminal.size()?;
        if (size.width, size.height) != app.layout.terminal_size() {
            app.resize(size.width, size.height);
        }

        terminal.draw(|f| match app.layout.mode() {
            LayoutMode::TooSmall => {
                let (width, height) = app.layout.terminal_size();
                let warning = WarningScreen::new(&app.theme).current_size(width, height);
                f.render_widget(warning, f.area());
            }
            LayoutMode::Columns => render_main_ui(f, app),
        })?;

        // 명령 하나를 끝까지 처리한 뒤 다음 입력을 기다린다
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
            Event::Resize(width, height) => app.resize(width, height),
            _ => {}
        }

        app.sync_path_display();
        if app.should_quit {
            break;
        }
    }

    tracing::info!("quit");
    Ok(())
}

/// 키 처리: 입력 상자가 열려 있으면 그쪽이 먼저
fn handle_key(app: &mut App, key: KeyEvent) {
    if app.is_prompt_open() {
        app.handle_prompt_key(key);
        return;
    }
    if let Some(command) = find_command(key.modifiers, key.code) {
        app.execute(command);
    }
}

fn render_main_ui(f: &mut ratatui::Frame<'_>, app: &App) {
    let areas = *app.layout.areas();
    let theme = &app.theme;

    // 상단 바: 경로 + 단축키 안내 (좁으면 안내 생략)
    let hints = app.top_bar_hints();
    f.render_widget(
        InfoBar::new()
            .left(&app.path_display)
            .right(&hints)
            .style(theme.bar_style())
            .left_style(theme.path_style()),
        areas.top_bar,
    );

    // 세 열
    f.render_widget(
        FolderPane::new(&app.navigator.parent, theme)
            .highlighted(app.navigator.current_index_in_parent()),
        areas.parent_pane,
    );
    f.render_widget(
        FolderPane::new(&app.navigator.main.listing, theme)
            .selected(app.navigator.main.selected()),
        areas.main_pane,
    );
    f.render_widget(PreviewPane::new(&app.preview, theme), areas.preview_pane);

    // 하단 바
    let (left, middle, right) = app.bottom_bar_sections();
    f.render_widget(
        InfoBar::new()
            .left(&left)
            .middle(&middle)
            .right(&right)
            .style(theme.bar_style()),
        areas.bottom_bar,
    );

    // 이름 입력 상자
    if let Some(ref prompt) = app.prompt {
        let screen = f.area();
        let prompt_box = PromptBox::new(prompt, theme);
        let cursor = prompt_box.cursor_position(screen);
        f.render_widget(prompt_box, screen);
        f.set_cursor_position(cursor);
    }
}
