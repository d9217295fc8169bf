use std::mem;
use std::path::{Path, PathBuf};

use anyhow::Result;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::error::Error;
use crate::pdf::merge_files;
use crate::queue::{display_name, MergeQueue};

use super::forms::PathForm;
use super::helpers::centered_rect;

/// Footer space reserved for the status message and key hints.
const FOOTER_HEIGHT: u16 = 3;
/// The file list grows to fit this many rows and scrolls beyond it.
const MAX_VISIBLE_ROWS: usize = 15;

/// Pointer-drag state machine for the file list.
///
/// `Anchored(i)` records the row grabbed by the last left-button press; drag
/// motion moves that row through adjacent swaps. The anchor survives button
/// release and is cleared by delete-via-key or any non-drag mutation of the
/// queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DragState {
    Idle,
    Anchored(usize),
}

/// Fine-grained modes layered over the single screen.
enum Mode {
    Normal,
    AddingFiles(PathForm),
    SavingAs(PathForm),
    ErrorDialog(String),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state: the merge queue plus everything the view needs
/// to render and interpret input. The queue is the only copy of the merge
/// order; rows are derived from it on every frame.
pub struct App {
    queue: MergeQueue,
    selected: usize,
    offset: usize,
    drag: DragState,
    mode: Mode,
    status: Option<StatusMessage>,
    last_merged: Option<PathBuf>,
    /// Inner rectangle of the file list from the last draw, recorded for
    /// mouse hit-testing.
    list_area: Option<Rect>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            queue: MergeQueue::new(),
            selected: 0,
            offset: 0,
            drag: DragState::Idle,
            mode: Mode::Normal,
            status: None,
            last_merged: None,
            list_area: None,
        }
    }

    // -- Controller operations -------------------------------------------

    /// Append a batch of files to the queue, preserving the given order.
    ///
    /// Atomic: if any path lacks the literal `.pdf` suffix the whole batch is
    /// rejected and the queue is unchanged. Matching is case-sensitive.
    pub(crate) fn add_files(&mut self, paths: Vec<PathBuf>) -> crate::error::Result<usize> {
        for path in &paths {
            if !path.to_string_lossy().ends_with(".pdf") {
                return Err(Error::InvalidFormat(path.clone()));
            }
        }
        let added = paths.len();
        for path in paths {
            self.queue.push(path);
        }
        self.drag = DragState::Idle;
        self.clamp_selection();
        Ok(added)
    }

    /// Remove the entry at `index`; later entries shift down by one.
    pub(crate) fn delete_pdf(&mut self, index: usize) -> crate::error::Result<PathBuf> {
        let removed = self.queue.remove(index)?;
        self.drag = DragState::Idle;
        self.clamp_selection();
        Ok(removed)
    }

    /// Merge the queue, in order, into `destination`. Never mutates the
    /// queue, so a failed merge can simply be retried.
    pub(crate) fn merge(&self, destination: &Path) -> crate::error::Result<usize> {
        merge_files(self.queue.paths(), destination)
    }

    /// The merge action is only offered while the queue is non-empty.
    pub(crate) fn merge_enabled(&self) -> bool {
        !self.queue.is_empty()
    }

    // -- Pointer state machine -------------------------------------------

    /// Left-button press over row `index`: anchor and select it.
    pub(crate) fn pointer_down(&mut self, index: usize) {
        if index < self.queue.len() {
            self.selected = index;
            self.drag = DragState::Anchored(index);
        }
    }

    /// Drag motion over row `target`: step the anchored row toward the
    /// pointer through adjacent swaps, one per row boundary crossed. A fast
    /// motion event spanning several rows is handled in full rather than
    /// performing a single swap.
    pub(crate) fn pointer_drag(&mut self, target: usize) -> crate::error::Result<()> {
        let DragState::Anchored(mut current) = self.drag else {
            return Ok(());
        };
        if target >= self.queue.len() || current >= self.queue.len() {
            return Ok(());
        }

        while current > target {
            self.queue.swap(current - 1, current)?;
            current -= 1;
        }
        while current < target {
            self.queue.swap(current, current + 1)?;
            current += 1;
        }

        self.drag = DragState::Anchored(current);
        self.selected = current;
        self.ensure_selected_visible(MAX_VISIBLE_ROWS);
        Ok(())
    }

    pub(crate) fn handle_mouse(&mut self, event: MouseEvent) -> Result<()> {
        // Modal forms and dialogs own the input until dismissed.
        if !matches!(self.mode, Mode::Normal) {
            return Ok(());
        }

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = self.row_at(event.column, event.row) {
                    self.pointer_down(index);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(index) = self.row_at(event.column, event.row) {
                    self.pointer_drag(index)?;
                }
            }
            MouseEventKind::ScrollUp => self.move_selection(-1),
            MouseEventKind::ScrollDown => self.move_selection(1),
            _ => {}
        }
        Ok(())
    }

    /// Map a screen position to a queue index using the list rectangle
    /// recorded during the last draw.
    fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.list_area?;
        if !area.contains(Position { x: column, y: row }) {
            return None;
        }
        let index = self.offset + (row - area.y) as usize;
        (index < self.queue.len()).then_some(index)
    }

    // -- Keyboard handling -----------------------------------------------

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingFiles(form) => self.handle_add_files(code, form),
            Mode::SavingAs(form) => self.handle_save_as(code, form),
            Mode::ErrorDialog(message) => match code {
                KeyCode::Enter | KeyCode::Esc => Mode::Normal,
                _ => Mode::ErrorDialog(message),
            },
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-5),
            KeyCode::PageDown => self.move_selection(5),
            KeyCode::Home => self.select_first(),
            KeyCode::End => self.select_last(),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('+') => {
                self.clear_status();
                return Ok(Mode::AddingFiles(PathForm::default()));
            }
            KeyCode::Char('-') | KeyCode::Delete => {
                return self.delete_selected();
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                // Disabled while the queue is empty.
                if self.merge_enabled() {
                    self.clear_status();
                    return Ok(Mode::SavingAs(PathForm::default()));
                }
            }
            KeyCode::Char('o') | KeyCode::Char('O') => self.open_last_merged(),
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_add_files(&mut self, code: KeyCode, mut form: PathForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Add cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Backspace => {
                form.backspace();
                Mode::AddingFiles(form)
            }
            KeyCode::Enter => {
                // An empty submission mirrors a cancelled picker.
                if form.is_blank() {
                    return Mode::Normal;
                }
                match form.expand_inputs() {
                    Ok(paths) => match self.add_files(paths) {
                        Ok(added) => {
                            let plural = if added == 1 { "" } else { "s" };
                            self.set_status(
                                format!("Added {added} file{plural}."),
                                StatusKind::Info,
                            );
                            Mode::Normal
                        }
                        Err(err) => Mode::ErrorDialog(format!(
                            "{err}. Only .pdf files can be merged; nothing was added."
                        )),
                    },
                    Err(err) => {
                        form.error = Some(err.to_string());
                        Mode::AddingFiles(form)
                    }
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
                Mode::AddingFiles(form)
            }
            _ => Mode::AddingFiles(form),
        }
    }

    fn handle_save_as(&mut self, code: KeyCode, mut form: PathForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Merge cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Backspace => {
                form.backspace();
                Mode::SavingAs(form)
            }
            KeyCode::Enter => {
                if form.is_blank() {
                    return Mode::Normal;
                }
                let destination = form.destination();
                match self.merge(&destination) {
                    Ok(pages) => {
                        let files = self.queue.len();
                        self.set_status(
                            format!(
                                "Merged {files} files ({pages} pages) into {}.",
                                display_name(&destination)
                            ),
                            StatusKind::Info,
                        );
                        self.last_merged = Some(destination);
                        Mode::Normal
                    }
                    // The queue is untouched on failure; the user can fix the
                    // problem and retry.
                    Err(err) => Mode::ErrorDialog(format!("Merge failed: {err}")),
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
                Mode::SavingAs(form)
            }
            _ => Mode::SavingAs(form),
        }
    }

    fn delete_selected(&mut self) -> Result<Mode> {
        if self.queue.is_empty() {
            self.set_status("Nothing to remove.", StatusKind::Error);
            return Ok(Mode::Normal);
        }
        let removed = self.delete_pdf(self.selected)?;
        self.set_status(
            format!("Removed {}.", display_name(&removed)),
            StatusKind::Info,
        );
        Ok(Mode::Normal)
    }

    /// Shift+Up: move the selected entry one step toward the top.
    pub(crate) fn handle_shift_up(&mut self) -> Result<()> {
        if !matches!(self.mode, Mode::Normal) {
            return Ok(());
        }
        if self.selected > 0 && self.selected < self.queue.len() {
            self.queue.swap(self.selected - 1, self.selected)?;
            self.selected -= 1;
            self.drag = DragState::Idle;
            self.ensure_selected_visible(MAX_VISIBLE_ROWS);
        }
        Ok(())
    }

    /// Shift+Down: move the selected entry one step toward the bottom.
    pub(crate) fn handle_shift_down(&mut self) -> Result<()> {
        if !matches!(self.mode, Mode::Normal) {
            return Ok(());
        }
        if self.selected + 1 < self.queue.len() {
            self.queue.swap(self.selected, self.selected + 1)?;
            self.selected += 1;
            self.drag = DragState::Idle;
            self.ensure_selected_visible(MAX_VISIBLE_ROWS);
        }
        Ok(())
    }

    fn open_last_merged(&mut self) {
        match &self.last_merged {
            Some(path) => {
                if let Err(err) = open::that(path) {
                    self.set_status(format!("Failed to open: {err}"), StatusKind::Error);
                } else {
                    self.set_status(
                        format!("Opened {}.", display_name(path)),
                        StatusKind::Info,
                    );
                }
            }
            None => self.set_status("Nothing has been merged yet.", StatusKind::Error),
        }
    }

    // -- Selection helpers -----------------------------------------------

    fn move_selection(&mut self, delta: isize) {
        if self.queue.is_empty() {
            return;
        }
        let len = self.queue.len() as isize;
        let mut new = self.selected as isize + delta;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
        self.ensure_selected_visible(MAX_VISIBLE_ROWS);
    }

    fn select_first(&mut self) {
        if !self.queue.is_empty() {
            self.selected = 0;
            self.ensure_selected_visible(MAX_VISIBLE_ROWS);
        }
    }

    fn select_last(&mut self) {
        if !self.queue.is_empty() {
            self.selected = self.queue.len() - 1;
            self.ensure_selected_visible(MAX_VISIBLE_ROWS);
        }
    }

    fn clamp_selection(&mut self) {
        if self.queue.is_empty() {
            self.selected = 0;
            self.offset = 0;
        } else {
            if self.selected >= self.queue.len() {
                self.selected = self.queue.len() - 1;
            }
            self.ensure_selected_visible(MAX_VISIBLE_ROWS);
        }
    }

    /// Keep the selected row inside the scroll window of `capacity` rows.
    fn ensure_selected_visible(&mut self, capacity: usize) {
        let capacity = capacity.max(1);
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + capacity {
            self.offset = self.selected + 1 - capacity;
        }
        let max_offset = self.queue.len().saturating_sub(capacity);
        if self.offset > max_offset {
            self.offset = max_offset;
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    // -- Rendering --------------------------------------------------------

    pub(crate) fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();

        if area.height > FOOTER_HEIGHT {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)])
                .split(area);
            self.draw_queue(frame, chunks[0]);
            self.draw_footer(frame, chunks[1]);
        } else {
            // Terminal too small for a footer.
            self.draw_queue(frame, area);
        }

        match &self.mode {
            Mode::AddingFiles(form) => self.draw_path_form(
                frame,
                area,
                "Add PDFs",
                "a file path or a glob like /scans/*.pdf",
                form,
            ),
            Mode::SavingAs(form) => self.draw_path_form(
                frame,
                area,
                "Merge and Save As",
                "destination path (.pdf added if missing)",
                form,
            ),
            Mode::ErrorDialog(message) => self.draw_error_dialog(frame, area, message),
            Mode::Normal => {}
        }
    }

    fn draw_queue(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let count = self.queue.len();
        let plural = if count == 1 { "" } else { "s" };
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("{count} file{plural} selected"),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::raw("Files are merged top to bottom.")),
        ])
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL).title("PDF Merge"));
        frame.render_widget(header, chunks[0]);

        if self.queue.is_empty() {
            self.list_area = None;
            let message = Paragraph::new(
                "No files are currently selected.\n\
                 Press [a] and enter a file path or a glob pattern to add PDFs.\n\
                 Reorder with the mouse or Shift+Up/Down, then press [m] to merge.",
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Selected files"));
            frame.render_widget(message, chunks[1]);
            return;
        }

        // The list grows with its content up to MAX_VISIBLE_ROWS, then keeps
        // a fixed height and scrolls.
        let clamped = count.min(MAX_VISIBLE_ROWS) as u16;
        let list_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(clamped + 2), Constraint::Min(0)])
            .split(chunks[1]);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Selected files");
        let inner = block.inner(list_chunks[0]);
        frame.render_widget(block, list_chunks[0]);

        self.list_area = Some(inner);
        let capacity = (inner.height as usize).max(1);
        self.ensure_selected_visible(capacity);

        let end = (self.offset + capacity).min(count);
        let items: Vec<ListItem> = self.queue.paths()[self.offset..end]
            .iter()
            .map(|path| ListItem::new(display_name(path)))
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut state = ListState::default();
        if self.selected >= self.offset && self.selected < end {
            state.select(Some(self.selected - self.offset));
        }
        frame.render_stateful_widget(list, inner, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        match &self.mode {
            Mode::AddingFiles(_) | Mode::SavingAs(_) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Confirm   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::ErrorDialog(_) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Dismiss"),
            ]),
            Mode::Normal => {
                let mut spans = vec![
                    Span::styled("[a]", key_style),
                    Span::raw(" Add   "),
                ];
                if !self.queue.is_empty() {
                    spans.extend([
                        Span::styled("[↑↓]", key_style),
                        Span::raw(" Select   "),
                        Span::styled("[Shift+↑↓]", key_style),
                        Span::raw(" Move   "),
                        Span::styled("[-]", key_style),
                        Span::raw(" Remove   "),
                        Span::styled("[m]", key_style),
                        Span::raw(" Merge   "),
                    ]);
                }
                if self.last_merged.is_some() {
                    spans.extend([
                        Span::styled("[o]", key_style),
                        Span::raw(" Open result   "),
                    ]);
                }
                spans.extend([Span::styled("[q]", key_style), Span::raw(" Quit")]);
                Line::from(spans)
            }
        }
    }

    fn draw_path_form(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        placeholder: &str,
        form: &PathForm,
    ) {
        let popup_area = centered_rect(70, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![form.build_line("Path", placeholder), Line::from("")];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to confirm, Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let cursor_x = inner.x + "Path: ".len() as u16 + form.value_len() as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn draw_error_dialog(&self, frame: &mut Frame, area: Rect, message: &str) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Error")
            .title_style(Style::default().fg(Color::Red))
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(message.to_string()),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to dismiss.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with(names: &[&str]) -> App {
        let mut app = App::new();
        app.add_files(names.iter().map(PathBuf::from).collect())
            .unwrap();
        app
    }

    fn order(app: &App) -> Vec<String> {
        app.queue
            .paths()
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    }

    /// The labels shown for the list are always the queue's paths,
    /// basename-transformed element-wise.
    fn labels(app: &App) -> Vec<String> {
        app.queue.paths().iter().map(|p| display_name(p)).collect()
    }

    #[test]
    fn add_files_preserves_order_and_labels() {
        let app = app_with(&["/a/x.pdf", "/b/y.pdf", "/c/z.pdf"]);
        assert_eq!(order(&app), ["/a/x.pdf", "/b/y.pdf", "/c/z.pdf"]);
        assert_eq!(labels(&app), ["x.pdf", "y.pdf", "z.pdf"]);
    }

    #[test]
    fn add_files_rejects_mixed_batch_atomically() {
        let mut app = app_with(&["/a/x.pdf"]);
        let err = app
            .add_files(vec![
                PathBuf::from("/b/y.pdf"),
                PathBuf::from("/a/report.txt"),
            ])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(_)));
        assert_eq!(order(&app), ["/a/x.pdf"]);
    }

    #[test]
    fn add_files_is_case_sensitive_about_the_suffix() {
        let mut app = App::new();
        let err = app.add_files(vec![PathBuf::from("/a/x.PDF")]).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(_)));
        assert!(app.queue.is_empty());
    }

    #[test]
    fn delete_pdf_shifts_later_entries_down() {
        let mut app = app_with(&["/a/x.pdf", "/b/y.pdf", "/c/z.pdf"]);
        let removed = app.delete_pdf(1).unwrap();
        assert_eq!(removed, PathBuf::from("/b/y.pdf"));
        assert_eq!(order(&app), ["/a/x.pdf", "/c/z.pdf"]);
    }

    #[test]
    fn stepwise_upward_drag_moves_item_to_the_top() {
        let mut app = app_with(&["/a/x.pdf", "/b/y.pdf", "/c/z.pdf"]);
        app.pointer_down(2);
        app.pointer_drag(1).unwrap();
        assert_eq!(order(&app), ["/a/x.pdf", "/c/z.pdf", "/b/y.pdf"]);
        app.pointer_drag(0).unwrap();
        assert_eq!(order(&app), ["/c/z.pdf", "/a/x.pdf", "/b/y.pdf"]);
        assert_eq!(app.drag, DragState::Anchored(0));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn multi_row_motion_event_equals_stepwise_swaps() {
        let mut app = app_with(&["/a/x.pdf", "/b/y.pdf", "/c/z.pdf"]);
        app.pointer_down(2);
        app.pointer_drag(0).unwrap();
        assert_eq!(order(&app), ["/c/z.pdf", "/a/x.pdf", "/b/y.pdf"]);
    }

    #[test]
    fn downward_drag_is_symmetric() {
        let mut app = app_with(&["/a/x.pdf", "/b/y.pdf", "/c/z.pdf"]);
        app.pointer_down(0);
        app.pointer_drag(2).unwrap();
        assert_eq!(order(&app), ["/b/y.pdf", "/c/z.pdf", "/a/x.pdf"]);
        assert_eq!(app.drag, DragState::Anchored(2));
    }

    #[test]
    fn drag_over_the_anchored_row_is_a_no_op() {
        let mut app = app_with(&["/a/x.pdf", "/b/y.pdf"]);
        app.pointer_down(1);
        app.pointer_drag(1).unwrap();
        assert_eq!(order(&app), ["/a/x.pdf", "/b/y.pdf"]);
    }

    #[test]
    fn drag_without_anchor_is_ignored() {
        let mut app = app_with(&["/a/x.pdf", "/b/y.pdf", "/c/z.pdf"]);
        app.pointer_drag(0).unwrap();
        assert_eq!(order(&app), ["/a/x.pdf", "/b/y.pdf", "/c/z.pdf"]);
        assert_eq!(app.drag, DragState::Idle);
    }

    #[test]
    fn delete_key_removes_anchored_row_and_clears_the_cursor() {
        let mut app = app_with(&["/a/x.pdf", "/b/y.pdf", "/c/z.pdf"]);
        app.pointer_down(1);
        assert!(!app.handle_key(KeyCode::Delete).unwrap());
        assert_eq!(order(&app), ["/a/x.pdf", "/c/z.pdf"]);
        assert_eq!(app.drag, DragState::Idle);
    }

    #[test]
    fn merge_is_disabled_until_a_file_is_added() {
        let mut app = App::new();
        assert!(!app.merge_enabled());
        // 'm' is ignored while empty: the app stays in Normal mode.
        app.handle_key(KeyCode::Char('m')).unwrap();
        assert!(matches!(app.mode, Mode::Normal));

        app.add_files(vec![PathBuf::from("/a/x.pdf")]).unwrap();
        assert!(app.merge_enabled());
        app.handle_key(KeyCode::Char('m')).unwrap();
        assert!(matches!(app.mode, Mode::SavingAs(_)));
    }

    #[test]
    fn shift_arrows_reorder_the_selection() {
        let mut app = app_with(&["/a/x.pdf", "/b/y.pdf", "/c/z.pdf"]);
        app.selected = 2;
        app.handle_shift_up().unwrap();
        assert_eq!(order(&app), ["/a/x.pdf", "/c/z.pdf", "/b/y.pdf"]);
        assert_eq!(app.selected, 1);

        app.handle_shift_down().unwrap();
        assert_eq!(order(&app), ["/a/x.pdf", "/b/y.pdf", "/c/z.pdf"]);
        assert_eq!(app.selected, 2);

        // End of the list: nothing moves.
        app.handle_shift_down().unwrap();
        assert_eq!(order(&app), ["/a/x.pdf", "/b/y.pdf", "/c/z.pdf"]);
    }

    #[test]
    fn selection_is_clamped_after_deleting_the_last_row() {
        let mut app = app_with(&["/a/x.pdf", "/b/y.pdf"]);
        app.selected = 1;
        app.delete_pdf(1).unwrap();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn row_hit_testing_accounts_for_border_and_scroll() {
        let mut app = app_with(&["/a/x.pdf", "/b/y.pdf", "/c/z.pdf"]);
        app.list_area = Some(Rect::new(1, 4, 30, 3));

        assert_eq!(app.row_at(5, 4), Some(0));
        assert_eq!(app.row_at(5, 6), Some(2));
        // Outside the list rectangle.
        assert_eq!(app.row_at(5, 3), None);
        assert_eq!(app.row_at(40, 5), None);

        app.offset = 1;
        assert_eq!(app.row_at(5, 4), Some(1));
    }

    #[test]
    fn rows_below_the_queue_do_not_hit() {
        let mut app = app_with(&["/a/x.pdf"]);
        app.list_area = Some(Rect::new(0, 0, 30, 10));
        assert_eq!(app.row_at(2, 0), Some(0));
        assert_eq!(app.row_at(2, 1), None);
    }
}
