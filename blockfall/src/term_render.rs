use crate::{
    board::{Board, Cell},
    catalog::Color,
    game::GameStatus,
    state::GameSnapshot,
};

#[derive(Clone, Debug, PartialEq)]
pub enum TermCell {
    Block(Cell),
    BorderVertical,
    BorderHorizontal,
    BorderTopLeft,
    BorderTopRight,
    BorderBottomLeft,
    BorderBottomRight,
    Space,
    Message(String),
}

pub trait TermStyle {
    fn display<'a>(&self, cell: &'a TermCell) -> &'a str;

    fn width(&self, cell: &TermCell) -> usize {
        match cell {
            TermCell::Block(_) | TermCell::BorderHorizontal => 2,
            TermCell::BorderVertical
            | TermCell::BorderTopLeft
            | TermCell::BorderTopRight
            | TermCell::BorderBottomLeft
            | TermCell::BorderBottomRight
            | TermCell::Space => 1,
            TermCell::Message(s) => s.chars().count(),
        }
    }

    /// Appended to every line; resets attributes for styles that set any
    fn line_end(&self) -> &'static str {
        ""
    }
}

pub trait TermRender {
    fn output(&self, style: &impl TermStyle) -> Vec<Vec<TermCell>>;

    fn render(&self, style: &impl TermStyle) -> Vec<String> {
        self.output(style)
            .iter()
            .map(|row| {
                let mut line: String = row.iter().map(|cell| style.display(cell)).collect();
                line.push_str(style.line_end());
                line
            })
            .collect()
    }
}

fn line_width(row: &[TermCell], style: &impl TermStyle) -> usize {
    row.iter().map(|cell| style.width(cell)).sum()
}

// Make all lines in block the same width by padding with TermCell::Space
pub fn pad_block_right(block: &mut [Vec<TermCell>], style: &impl TermStyle) {
    let width = block
        .iter()
        .map(|row| line_width(row, style))
        .max()
        .unwrap_or(0);
    for row in block.iter_mut() {
        let padding = width - line_width(row, style);
        row.extend(std::iter::repeat_n(TermCell::Space, padding));
    }
}

pub struct PlainTermStyle;

impl TermStyle for PlainTermStyle {
    fn display<'a>(&self, cell: &'a TermCell) -> &'a str {
        match cell {
            TermCell::Block(Cell::Empty) => "  ",
            TermCell::Block(Cell::Filled(_)) => "[]",
            TermCell::BorderVertical => "|",
            TermCell::BorderHorizontal => "--",
            TermCell::BorderTopLeft
            | TermCell::BorderTopRight
            | TermCell::BorderBottomLeft
            | TermCell::BorderBottomRight => "+",
            TermCell::Space => " ",
            TermCell::Message(s) => s.as_str(),
        }
    }
}

pub struct AnsiTermStyle;

impl AnsiTermStyle {
    fn block(color: Color) -> &'static str {
        match color {
            Color::Red => "\x1b[0;31m[]",
            Color::Green => "\x1b[0;32m[]",
            Color::Blue => "\x1b[0;34m[]",
            Color::Yellow => "\x1b[0;33m[]",
            Color::Magenta => "\x1b[0;35m[]",
            Color::Cyan => "\x1b[0;36m[]",
            Color::Orange => "\x1b[0;38;5;208m[]",
        }
    }
}

impl TermStyle for AnsiTermStyle {
    fn display<'a>(&self, cell: &'a TermCell) -> &'a str {
        match cell {
            TermCell::Block(Cell::Empty) => "\x1b[0m  ",
            TermCell::Block(Cell::Filled(color)) => Self::block(*color),
            TermCell::BorderVertical => "\x1b[0m│",
            TermCell::BorderHorizontal => "\x1b[0m──",
            TermCell::BorderTopLeft => "\x1b[0m┌",
            TermCell::BorderTopRight => "\x1b[0m┐",
            TermCell::BorderBottomLeft => "\x1b[0m└",
            TermCell::BorderBottomRight => "\x1b[0m┘",
            TermCell::Space => " ",
            TermCell::Message(s) => s.as_str(),
        }
    }

    fn line_end(&self) -> &'static str {
        "\x1b[0m"
    }
}

impl TermRender for Board {
    fn output(&self, _style: &impl TermStyle) -> Vec<Vec<TermCell>> {
        self.cells()
            .iter()
            .map(|row| row.iter().copied().map(TermCell::Block).collect())
            .collect()
    }
}

fn horizontal_border(left: TermCell, cols: usize, right: TermCell) -> Vec<TermCell> {
    let mut line = Vec::with_capacity(cols + 2);
    line.push(left);
    line.extend(std::iter::repeat_n(TermCell::BorderHorizontal, cols));
    line.push(right);
    line
}

/// The playing field inside a border, with a banner while halted
pub struct WellField {
    board: Board,
    status: GameStatus,
}

impl WellField {
    pub fn new(board: Board, status: GameStatus) -> Self {
        Self { board, status }
    }

    fn banner(&self) -> Option<&'static str> {
        match self.status {
            GameStatus::Running => None,
            GameStatus::Paused => Some("Paused"),
            GameStatus::GameOver => Some("Game Over"),
        }
    }
}

impl TermRender for WellField {
    fn output(&self, style: &impl TermStyle) -> Vec<Vec<TermCell>> {
        let mut lines = self.board.output(style);
        if let Some(banner) = self.banner()
            && !lines.is_empty()
        {
            let inner = line_width(&lines[0], style);
            let indent = inner.saturating_sub(banner.len()) / 2;
            let middle = lines.len() / 2;
            lines[middle] = vec![TermCell::Message(format!("{}{}", " ".repeat(indent), banner))];
            pad_block_right(&mut lines, style);
        }

        for line in &mut lines {
            line.insert(0, TermCell::BorderVertical);
            line.push(TermCell::BorderVertical);
        }
        lines.insert(
            0,
            horizontal_border(
                TermCell::BorderTopLeft,
                self.board.cols(),
                TermCell::BorderTopRight,
            ),
        );
        lines.push(horizontal_border(
            TermCell::BorderBottomLeft,
            self.board.cols(),
            TermCell::BorderBottomRight,
        ));
        lines
    }
}

/// Score, lines and key bindings shown beside the well
pub struct SidePanel {
    lines: Vec<String>,
}

impl SidePanel {
    pub fn new(snapshot: &GameSnapshot) -> Self {
        let status = match snapshot.status {
            GameStatus::Running if snapshot.fast_drop => "Running (fast)",
            GameStatus::Running => "Running",
            GameStatus::Paused => "Paused",
            GameStatus::GameOver => "Game Over",
        };
        let lines = vec![
            format!("Score: {}", snapshot.score),
            format!("Lines: {}", snapshot.lines),
            format!("Speed: {:.0} ms", snapshot.drop_interval_ms),
            format!("State: {}", status),
            String::new(),
            "← →    move".to_string(),
            "↑      rotate".to_string(),
            "↓      fast drop".to_string(),
            "Space  pause".to_string(),
            "Enter  start".to_string(),
            "r      reset".to_string(),
            "q      quit".to_string(),
        ];
        Self { lines }
    }
}

impl TermRender for SidePanel {
    fn output(&self, _style: &impl TermStyle) -> Vec<Vec<TermCell>> {
        self.lines
            .iter()
            .map(|line| vec![TermCell::Message(line.clone())])
            .collect()
    }
}

/// Well and side panel next to each other
pub struct GameView {
    well: WellField,
    panel: SidePanel,
}

impl GameView {
    pub fn new(snapshot: &GameSnapshot) -> Self {
        Self {
            well: WellField::new(snapshot.well.clone(), snapshot.status),
            panel: SidePanel::new(snapshot),
        }
    }
}

impl TermRender for GameView {
    fn output(&self, style: &impl TermStyle) -> Vec<Vec<TermCell>> {
        let mut well_lines = self.well.output(style);
        let mut panel_lines = self.panel.output(style);
        pad_block_right(&mut well_lines, style);

        let well_width = well_lines.first().map_or(0, |row| line_width(row, style));
        let total = well_lines.len().max(panel_lines.len());
        well_lines.resize_with(total, || vec![TermCell::Space; well_width]);
        panel_lines.resize_with(total, Vec::new);

        // Panel starts one row down, level with the first board row
        panel_lines.rotate_right(1);

        let mut lines: Vec<Vec<TermCell>> = well_lines
            .into_iter()
            .zip(panel_lines)
            .map(|(mut line, mut panel)| {
                line.push(TermCell::Space);
                line.push(TermCell::Space);
                line.append(&mut panel);
                line
            })
            .collect();
        // Overwrite stale characters from longer previous frames
        pad_block_right(&mut lines, style);
        lines
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::config::GameConfig;
    use crate::game::Game;

    #[test]
    fn test_board_output_maps_cells() {
        let mut board = Board::new(3, 2);
        board.set_cell(1, 1, Cell::Filled(Color::Green));
        let lines = board.render(&PlainTermStyle);
        assert_eq!(lines, vec!["      ", "  []  "]);
    }

    #[test]
    fn test_well_has_border() {
        let mut board = Board::new(2, 2);
        board.set_cell(0, 1, Cell::Filled(Color::Red));
        let lines = WellField::new(board, GameStatus::Running).render(&PlainTermStyle);
        assert_eq!(lines, vec!["+----+", "|    |", "|[]  |", "+----+"]);
    }

    #[test]
    fn test_game_over_banner_is_centered() {
        let board = Board::new(10, 5);
        let lines = WellField::new(board, GameStatus::GameOver).render(&PlainTermStyle);
        assert_eq!(lines.len(), 7);
        // Inner width 20, banner 9 wide
        assert_eq!(lines[3], "|     Game Over      |");
        assert!(lines.iter().all(|line| line.chars().count() == 22));
    }

    #[test]
    fn test_paused_banner() {
        let lines = WellField::new(Board::new(6, 3), GameStatus::Paused).render(&PlainTermStyle);
        assert!(lines[2].contains("Paused"));
    }

    #[test]
    fn test_pad_block_right() {
        let mut block = vec![
            vec![TermCell::Message("abc".to_string())],
            vec![TermCell::Space],
            vec![],
        ];
        pad_block_right(&mut block, &PlainTermStyle);
        for row in &block {
            assert_eq!(line_width(row, &PlainTermStyle), 3);
        }
    }

    #[test]
    fn test_ansi_colors_and_reset() {
        let mut board = Board::new(1, 1);
        board.set_cell(0, 0, Cell::Filled(Color::Orange));
        let lines = board.render(&AnsiTermStyle);
        assert_eq!(lines, vec!["\x1b[0;38;5;208m[]\x1b[0m"]);
    }

    #[test]
    fn test_game_view_shows_score_beside_well() {
        let mut game = Game::with_seed(GameConfig::new().with_board_size(6, 14), 2).unwrap();
        game.reset(Instant::now());
        let snapshot = game.snapshot();
        let lines = GameView::new(&snapshot).render(&PlainTermStyle);

        assert_eq!(lines.len(), 16);
        assert!(lines[0].starts_with("+------------+"));
        assert!(lines[1].contains("Score: 0"));
        assert!(lines[2].contains("Lines: 0"));
        assert!(lines[4].contains("State: Running"));
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|line| line.chars().count() == width));
    }
}
