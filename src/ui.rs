use crate::advice::{AdviceEngine, AdviceSet, ConditionId, Severity, DISCLAIMER};
use crate::bmi::{Bmi, Tone, DEFAULT_HEIGHT_M, DEFAULT_WEIGHT_KG, HEIGHT_RANGE, WEIGHT_RANGE};
use crate::dataset::{ChartKind, HealthDataset};
use crate::insights::{self, Insights, Slice};
use crate::report::UploadedReport;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, GraphType, List,
        ListItem, ListState, Paragraph, Row, Table, Wrap,
    },
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    BmiCalculator,
    Visualizations,
    CheckHealth,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::BmiCalculator, Page::Visualizations, Page::CheckHealth];

    pub fn next(&self) -> Self {
        match self {
            Page::Home => Page::BmiCalculator,
            Page::BmiCalculator => Page::Visualizations,
            Page::Visualizations => Page::CheckHealth,
            Page::CheckHealth => Page::Home,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Home => Page::CheckHealth,
            Page::BmiCalculator => Page::Home,
            Page::Visualizations => Page::BmiCalculator,
            Page::CheckHealth => Page::Visualizations,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "🏠 Home",
            Page::BmiCalculator => "🧮 BMI Calculator",
            Page::Visualizations => "📊 Visualizations",
            Page::CheckHealth => "🧾 Check Your Health",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiField {
    Height,
    Weight,
}

pub struct App {
    pub current_page: Page,
    pub insights: Insights,
    pub dataset: HealthDataset,
    pub numeric_columns: Vec<String>,
    pub height_m: f64,
    pub weight_kg: f64,
    pub bmi_field: BmiField,
    pub bmi_result: Option<std::result::Result<Bmi, String>>,
    pub chart_kind: ChartKind,
    pub metric_index: usize,
    pub report: Option<UploadedReport>,
    pub report_error: Option<String>,
    pub condition_state: ListState,
    engine: AdviceEngine,
}

impl App {
    pub fn new(dataset: HealthDataset) -> Self {
        let numeric_columns = dataset.numeric_columns();

        let mut condition_state = ListState::default();
        condition_state.select(Some(0));

        Self {
            current_page: Page::Home,
            insights: Insights::sample(),
            dataset,
            numeric_columns,
            height_m: DEFAULT_HEIGHT_M,
            weight_kg: DEFAULT_WEIGHT_KG,
            bmi_field: BmiField::Height,
            bmi_result: None,
            chart_kind: ChartKind::Bar,
            metric_index: 0,
            report: None,
            report_error: None,
            condition_state,
            engine: AdviceEngine::new(),
        }
    }

    /// Attach the report given on the command line; a rejected file is shown as an error
    pub fn with_report(mut self, report: Option<crate::error::Result<UploadedReport>>) -> Self {
        match report {
            Some(Ok(report)) => self.report = Some(report),
            Some(Err(e)) => self.report_error = Some(e.to_string()),
            None => {}
        }
        self
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    // ------------------------------------------------------------------------
    // BMI
    // ------------------------------------------------------------------------

    pub fn toggle_bmi_field(&mut self) {
        self.bmi_field = match self.bmi_field {
            BmiField::Height => BmiField::Weight,
            BmiField::Weight => BmiField::Height,
        };
    }

    /// Step the focused input up or down, staying inside its accepted range
    pub fn adjust_bmi(&mut self, up: bool) {
        let sign = if up { 1.0 } else { -1.0 };
        match self.bmi_field {
            BmiField::Height => {
                let next = ((self.height_m + sign * 0.01) * 100.0).round() / 100.0;
                self.height_m = next.clamp(HEIGHT_RANGE.0, HEIGHT_RANGE.1);
            }
            BmiField::Weight => {
                let next = ((self.weight_kg + sign * 0.5) * 10.0).round() / 10.0;
                self.weight_kg = next.clamp(WEIGHT_RANGE.0, WEIGHT_RANGE.1);
            }
        }
    }

    pub fn calculate_bmi(&mut self) {
        self.bmi_result = Some(Bmi::calculate(self.height_m, self.weight_kg).map_err(|e| e.to_string()));
    }

    // ------------------------------------------------------------------------
    // Visualizations
    // ------------------------------------------------------------------------

    pub fn select_chart(&mut self, kind: ChartKind) {
        self.chart_kind = kind;
    }

    pub fn next_metric(&mut self) {
        if !self.numeric_columns.is_empty() {
            self.metric_index = (self.metric_index + 1) % self.numeric_columns.len();
        }
    }

    pub fn selected_metric(&self) -> Option<&str> {
        self.numeric_columns.get(self.metric_index).map(String::as_str)
    }

    // ------------------------------------------------------------------------
    // Check Your Health
    // ------------------------------------------------------------------------

    pub fn next_condition(&mut self) {
        let len = ConditionId::ALL.len();
        let i = match self.condition_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.condition_state.select(Some(i));
    }

    pub fn previous_condition(&mut self) {
        let len = ConditionId::ALL.len();
        let i = match self.condition_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.condition_state.select(Some(i));
    }

    pub fn selected_condition(&self) -> ConditionId {
        self.condition_state
            .selected()
            .and_then(|i| ConditionId::ALL.get(i).copied())
            .unwrap_or(ConditionId::NoneOrUnsure)
    }

    /// Suggestions are only offered once a report has been uploaded
    pub fn advice(&self) -> Option<AdviceSet> {
        self.report
            .as_ref()
            .map(|_| self.engine.lookup(self.selected_condition()))
    }

    /// Apply one key press. Returns false when the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::BackTab => self.previous_page(),
            KeyCode::Tab => {
                if modifiers.contains(KeyModifiers::SHIFT) {
                    self.previous_page();
                } else {
                    self.next_page();
                }
            }
            _ => match self.current_page {
                Page::Home => {}
                Page::BmiCalculator => match code {
                    KeyCode::Left | KeyCode::Right => self.toggle_bmi_field(),
                    KeyCode::Up | KeyCode::Char('k') => self.adjust_bmi(true),
                    KeyCode::Down | KeyCode::Char('j') => self.adjust_bmi(false),
                    KeyCode::Enter => self.calculate_bmi(),
                    _ => {}
                },
                Page::Visualizations => match code {
                    KeyCode::Char('1') => self.select_chart(ChartKind::Bar),
                    KeyCode::Char('2') => self.select_chart(ChartKind::Line),
                    KeyCode::Char('3') => self.select_chart(ChartKind::CorrelationHeatmap),
                    KeyCode::Char('m') => self.next_metric(),
                    _ => {}
                },
                Page::CheckHealth => match code {
                    KeyCode::Down | KeyCode::Char('j') => self.next_condition(),
                    KeyCode::Up | KeyCode::Char('k') => self.previous_condition(),
                    _ => {}
                },
            },
        }
        true
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && !app.handle_key(key.code, key.modifiers) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Home => render_home(f, chunks[1], app),
        Page::BmiCalculator => render_bmi(f, chunks[1], app),
        Page::Visualizations => render_visualizations(f, chunks[1], app),
        Page::CheckHealth => render_check_health(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(title)
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![Span::styled(
        "HealthBot  ",
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
    )];

    for (i, page) in Page::ALL.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));

    let mut spans = match app.current_page {
        Page::Home => vec![Span::raw(" Your Personal Health Assistant Dashboard ")],
        Page::BmiCalculator => vec![
            key(" ←/→"),
            Span::raw(" Field | "),
            key("↑/↓"),
            Span::raw(" Adjust | "),
            key("Enter"),
            Span::raw(" Calculate "),
        ],
        Page::Visualizations => vec![
            key(" 1/2/3"),
            Span::raw(" Chart | "),
            key("m"),
            Span::raw(" Metric "),
        ],
        Page::CheckHealth => vec![key(" ↑/↓"), Span::raw(" Condition ")],
    };

    spans.push(Span::raw("| "));
    spans.push(key("Tab"));
    spans.push(Span::raw(" Page | "));
    spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(spans)]).block(bordered(""));
    f.render_widget(status_bar, area);
}

// ============================================================================
// Home
// ============================================================================

fn render_home(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Percentage(40),
            Constraint::Min(0),
        ])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[0]);

    for (metric, card) in app.insights.key_metrics.iter().zip(cards.iter()) {
        let content = vec![
            Line::from(Span::styled(
                format!("{} {}", metric.icon, metric.value),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(metric.description, Style::default().fg(Color::DarkGray))),
        ];
        let paragraph = Paragraph::new(content)
            .wrap(Wrap { trim: true })
            .block(bordered(metric.title));
        f.render_widget(paragraph, *card);
    }

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    render_slices(f, middle[0], " BMI Distribution ", &app.insights.bmi_distribution, Color::LightMagenta);
    render_slices(f, middle[1], " Heart Disease Prevalence ", &app.insights.heart_disease, Color::LightCyan);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
        ])
        .split(rows[2]);

    let weight: Vec<(f64, f64)> = app
        .insights
        .weekly_trends
        .iter()
        .map(|t| (t.day as f64, t.weight_kg))
        .collect();
    let steps: Vec<(f64, f64)> = app
        .insights
        .weekly_trends
        .iter()
        .map(|t| (t.day as f64, t.steps as f64))
        .collect();

    render_line_chart(f, bottom[0], " Weight (kg) ", "Day", &weight, Color::LightMagenta);
    render_line_chart(f, bottom[1], " Steps per Day ", "Day", &steps, Color::Blue);

    let averages: Vec<(String, f64)> = app
        .insights
        .average_metrics
        .iter()
        .map(|m| (m.metric.to_string(), m.value))
        .collect();
    render_bar_chart(f, bottom[2], " Sample Average Health Metrics ", &averages);
}

/// Pie-style breakdown as labelled share bars
fn render_slices(f: &mut Frame, area: Rect, title: &str, slices: &[Slice], color: Color) {
    let total = insights::total(slices);
    let width = area.width.saturating_sub(30) as f64;

    let lines: Vec<Line> = slices
        .iter()
        .map(|s| {
            let share = s.share(total);
            let bar = "█".repeat((share / 100.0 * width).round() as usize);
            Line::from(vec![
                Span::raw(format!(" {:<12}{:>5} {:>5.1}% ", s.label, s.count, share)),
                Span::styled(bar, Style::default().fg(color)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(bordered(title)), area);
}

fn render_bar_chart(f: &mut Frame, area: Rect, title: &str, points: &[(String, f64)]) {
    let bars: Vec<Bar> = points
        .iter()
        .map(|(label, value)| {
            Bar::default()
                .label(Line::from(truncate(label, 10)))
                .value(value.max(0.0).round() as u64)
                .text_value(format!("{:.1}", value))
        })
        .collect();

    let chart = BarChart::default()
        .block(bordered(title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::LightBlue))
        .value_style(Style::default().fg(Color::Black).bg(Color::LightBlue));

    f.render_widget(chart, area);
}

fn render_line_chart(f: &mut Frame, area: Rect, title: &str, x_title: &str, points: &[(f64, f64)], color: Color) {
    let x_bounds = bounds(points.iter().map(|p| p.0));
    let y_bounds = bounds(points.iter().map(|p| p.1));

    let datasets = vec![Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(points)];

    let axis_labels = |b: [f64; 2]| vec![Span::raw(format!("{:.1}", b[0])), Span::raw(format!("{:.1}", b[1]))];

    let chart = Chart::new(datasets)
        .block(bordered(title))
        .x_axis(
            Axis::default()
                .title(x_title)
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds)),
        );

    f.render_widget(chart, area);
}

/// Min/max of the values, widened when flat so the axis is never degenerate
fn bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !min.is_finite() || !max.is_finite() {
        [0.0, 1.0]
    } else if min == max {
        [min - 1.0, max + 1.0]
    } else {
        [min, max]
    }
}

// ============================================================================
// BMI Calculator
// ============================================================================

fn render_bmi(f: &mut Frame, area: Rect, app: &App) {
    let field = |name: &str, value: String, focused: bool| {
        let style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        Line::from(vec![
            Span::raw(if focused { "  → " } else { "    " }),
            Span::styled(format!("{:<18}", name), Style::default().fg(Color::Cyan)),
            Span::styled(value, style),
        ])
    };

    let mut content = vec![
        Line::from(""),
        field(
            "Height (meters)",
            format!("{:.2}", app.height_m),
            app.bmi_field == BmiField::Height,
        ),
        field(
            "Weight (kg)",
            format!("{:.1}", app.weight_kg),
            app.bmi_field == BmiField::Weight,
        ),
        Line::from(""),
    ];

    match &app.bmi_result {
        Some(Ok(bmi)) => {
            let color = match bmi.category.tone() {
                Tone::Success => Color::Green,
                Tone::Warning => Color::Yellow,
                Tone::Error => Color::Red,
            };
            content.push(Line::from(Span::styled(
                format!("  {}", bmi),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            content.push(Line::from(Span::styled(
                format!("  {}", bmi.category.label()),
                Style::default().fg(Color::Black).bg(color),
            )));
        }
        Some(Err(message)) => {
            content.push(Line::from(Span::styled(
                format!("  {}", message),
                Style::default().fg(Color::Red),
            )));
        }
        None => {
            content.push(Line::from(Span::styled(
                "  Press Enter to calculate BMI",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
        }
    }

    f.render_widget(Paragraph::new(content).block(bordered(" 🧮 BMI Calculator ")), area);
}

// ============================================================================
// Visualizations
// ============================================================================

fn render_visualizations(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let mut selector: Vec<Span> = Vec::new();
    for (i, kind) in ChartKind::ALL.iter().enumerate() {
        let style = if *kind == app.chart_kind {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        selector.push(Span::styled(format!(" {}. {} ", i + 1, kind.title()), style));
    }
    if app.chart_kind.needs_metric() {
        selector.push(Span::raw("  Metric: "));
        selector.push(Span::styled(
            app.selected_metric().unwrap_or("-").to_string(),
            Style::default().fg(Color::Green),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(selector)).block(bordered(" Select Chart Type ")),
        chunks[0],
    );

    let result = match (app.chart_kind, app.selected_metric()) {
        (ChartKind::CorrelationHeatmap, _) => {
            render_heatmap(f, chunks[1], app);
            Ok(())
        }
        (_, None) => Err("No numeric columns in dataset".to_string()),
        (ChartKind::Bar, Some(metric)) => app
            .dataset
            .bar_series(metric)
            .map(|points| render_bar_chart(f, chunks[1], &format!(" {} by Name ", metric), &points))
            .map_err(|e| e.to_string()),
        (ChartKind::Line, Some(metric)) => app
            .dataset
            .line_series(metric)
            .map(|points| render_line_chart(f, chunks[1], &format!(" {} by Age ", metric), "Age", &points, Color::LightBlue))
            .map_err(|e| e.to_string()),
    };

    if let Err(message) = result {
        let paragraph = Paragraph::new(Span::styled(message, Style::default().fg(Color::Red)))
            .block(bordered(" Chart "));
        f.render_widget(paragraph, chunks[1]);
    }
}

fn heat_color(value: f64) -> Color {
    if value.is_nan() {
        Color::DarkGray
    } else if value >= 0.6 {
        Color::Red
    } else if value >= 0.2 {
        Color::LightRed
    } else if value > -0.2 {
        Color::Gray
    } else if value > -0.6 {
        Color::LightBlue
    } else {
        Color::Blue
    }
}

fn render_heatmap(f: &mut Frame, area: Rect, app: &App) {
    let matrix = app.dataset.correlation_matrix();

    let header_cells = std::iter::once(String::new())
        .chain(matrix.columns.iter().map(|c| truncate(c, 10)))
        .map(|h| Cell::from(h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells).height(1);

    let rows = matrix.columns.iter().zip(matrix.values.iter()).map(|(name, values)| {
        let cells = std::iter::once(Cell::from(truncate(name, 10)).style(Style::default().fg(Color::Yellow)))
            .chain(values.iter().map(|v| {
                let text = if v.is_nan() { "nan".to_string() } else { format!("{:.2}", v) };
                Cell::from(text).style(Style::default().fg(Color::Black).bg(heat_color(*v)))
            }));
        Row::new(cells.collect::<Vec<_>>()).height(1)
    });

    let widths = vec![Constraint::Length(11); matrix.columns.len() + 1];
    let table = Table::new(rows, widths)
        .header(header)
        .block(bordered(" Correlation Between Health Metrics "));

    f.render_widget(table, area);
}

// ============================================================================
// Check Your Health
// ============================================================================

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Warning => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        Severity::Success => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Severity::Info => Style::default().fg(Color::White),
    }
}

fn render_check_health(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let items: Vec<ListItem> = ConditionId::ALL
        .iter()
        .map(|c| ListItem::new(c.label()))
        .collect();

    let list = List::new(items)
        .block(bordered(" Select the condition mentioned in your report "))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, chunks[0], &mut app.condition_state);

    let mut content = vec![Line::from("")];

    match (&app.report, app.advice()) {
        (Some(report), Some(advice)) => {
            content.push(Line::from(Span::styled(
                format!("  {}", report.caption()),
                Style::default().fg(Color::Cyan),
            )));
            content.push(Line::from(""));
            content.push(Line::from(Span::styled(
                format!("  {}", DISCLAIMER),
                Style::default().fg(Color::LightBlue),
            )));
            content.push(Line::from(""));
            for line in &advice {
                content.push(Line::from(Span::styled(
                    format!("  {}", line.text()),
                    severity_style(line.severity()),
                )));
            }
        }
        _ => {
            let message = app
                .report_error
                .clone()
                .unwrap_or_else(|| "No report uploaded. Start with --report <image.png|jpg|jpeg>".to_string());
            content.push(Line::from(Span::styled(
                format!("  {}", message),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
        }
    }

    let panel = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(bordered(" 🧾 Upload & Check Your Health Report "));

    f.render_widget(panel, chunks[1]);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let csv = "Name,Age,Weight,Steps,City\nAlice,25,60,8000,Lima\nBob,35,80,6000,Quito\n";
        App::new(HealthDataset::from_reader(csv.as_bytes()).unwrap())
    }

    fn report() -> UploadedReport {
        UploadedReport {
            path: "scan.png".into(),
            file_name: "scan.png".to_string(),
            size_bytes: 3,
        }
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_page_cycle() {
        let mut app = app();
        for expected in [Page::BmiCalculator, Page::Visualizations, Page::CheckHealth, Page::Home] {
            press(&mut app, KeyCode::Tab);
            assert_eq!(app.current_page, expected);
        }
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.current_page, Page::CheckHealth);
        app.handle_key(KeyCode::Tab, KeyModifiers::SHIFT);
        assert_eq!(app.current_page, Page::Visualizations);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert!(!press(&mut app, KeyCode::Esc));
        assert!(press(&mut app, KeyCode::Char('x')));
    }

    #[test]
    fn test_bmi_inputs_and_calculation() {
        let mut app = app();
        app.current_page = Page::BmiCalculator;

        press(&mut app, KeyCode::Up);
        assert!((app.height_m - 1.66).abs() < 1e-9);

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Down);
        assert!((app.weight_kg - 64.5).abs() < 1e-9);

        press(&mut app, KeyCode::Enter);
        let bmi = app.bmi_result.clone().unwrap().unwrap();
        assert!((bmi.value - 64.5 / (1.66 * 1.66)).abs() < 1e-9);
    }

    #[test]
    fn test_bmi_inputs_clamped() {
        let mut app = app();
        app.height_m = 2.5;
        app.adjust_bmi(true);
        assert_eq!(app.height_m, 2.5);

        app.toggle_bmi_field();
        app.weight_kg = 30.0;
        app.adjust_bmi(false);
        assert_eq!(app.weight_kg, 30.0);
    }

    #[test]
    fn test_chart_and_metric_selection() {
        let mut app = app();
        app.current_page = Page::Visualizations;
        assert_eq!(app.selected_metric(), Some("Age"));

        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.selected_metric(), Some("Weight"));
        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.selected_metric(), Some("Age"));

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.chart_kind, ChartKind::CorrelationHeatmap);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.chart_kind, ChartKind::Line);
    }

    #[test]
    fn test_advice_requires_report() {
        let mut app = app();
        app.current_page = Page::CheckHealth;
        assert!(app.advice().is_none());

        let mut app = app.with_report(Some(Ok(report())));
        assert_eq!(app.advice().unwrap().len(), 2);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_condition(), ConditionId::Diabetes);
        let advice = app.advice().unwrap();
        assert_eq!(advice.len(), 4);
        assert_eq!(advice.lines()[0].severity(), Severity::Warning);
    }

    #[test]
    fn test_condition_selection_wraps() {
        let mut app = app();
        app.previous_condition();
        assert_eq!(app.selected_condition(), ConditionId::LiverIssues);
        app.next_condition();
        assert_eq!(app.selected_condition(), ConditionId::NoneOrUnsure);
    }

    #[test]
    fn test_rejected_report_is_reported() {
        let app = app().with_report(Some(Err(crate::error::HealthError::UnsupportedReport {
            path: "notes.txt".into(),
            reason: "expected one of png, jpg, jpeg".to_string(),
        })));
        assert!(app.report.is_none());
        assert!(app.report_error.unwrap().contains("notes.txt"));
    }

    #[test]
    fn test_bounds_and_truncate() {
        assert_eq!(bounds([3.0, 1.0, 2.0].into_iter()), [1.0, 3.0]);
        assert_eq!(bounds([5.0].into_iter()), [4.0, 6.0]);
        assert_eq!(bounds(std::iter::empty()), [0.0, 1.0]);
        assert_eq!(truncate("Blood Pressure", 10), "Blood P...");
        assert_eq!(truncate("BMI", 10), "BMI");
    }
}
