//! Text rendition of a snapshot
//!
//! One tile is two terminal columns wide so the board keeps a roughly square
//! aspect. Ghosts are drawn over the agent, the agent over the tiles.

use glam::IVec2;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as Axis, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::sim::{Direction, Outcome, Rgb, Snapshot, Tile, cell_of};

/// What one board cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Empty,
    Wall,
    Pellet,
    Agent { dir: Direction, mouth_open: bool },
    Ghost(Rgb),
}

impl Glyph {
    fn span(self) -> Span<'static> {
        match self {
            Glyph::Empty => Span::raw("  "),
            Glyph::Wall => Span::styled("██", Style::default().fg(Color::Rgb(0, 0, 200))),
            Glyph::Pellet => Span::styled("· ", Style::default().fg(Color::Yellow)),
            Glyph::Agent { dir, mouth_open } => Span::styled(
                agent_symbol(dir, mouth_open),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Glyph::Ghost(c) => Span::styled(
                "ᗣ ",
                Style::default()
                    .fg(Color::Rgb(c.r, c.g, c.b))
                    .add_modifier(Modifier::BOLD),
            ),
        }
    }
}

/// Mouth opens toward the heading; a stopped agent faces right
fn agent_symbol(dir: Direction, mouth_open: bool) -> &'static str {
    if !mouth_open {
        return "O ";
    }
    match dir {
        Direction::Up => "V ",
        Direction::Down => "Λ ",
        Direction::Left => "Ɔ ",
        Direction::Right | Direction::None => "C ",
    }
}

/// Lay the snapshot out as rows of glyphs. Entities in the tunnel beyond the
/// board edge are not drawn.
pub fn glyph_rows(snap: &Snapshot<'_>) -> Vec<Vec<Glyph>> {
    let mut rows: Vec<Vec<Glyph>> = (0..snap.rows)
        .map(|row| {
            (0..snap.cols)
                .map(|col| match snap.tile(col, row) {
                    Some(Tile::Wall) => Glyph::Wall,
                    Some(Tile::Pellet) => Glyph::Pellet,
                    _ => Glyph::Empty,
                })
                .collect()
        })
        .collect();

    let mut place = |pos: IVec2, glyph: Glyph| {
        let cell = cell_of(pos);
        let (Ok(col), Ok(row)) = (usize::try_from(cell.col), usize::try_from(cell.row)) else {
            return;
        };
        if let Some(slot) = rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *slot = glyph;
        }
    };

    place(
        snap.agent.pos,
        Glyph::Agent {
            dir: snap.agent.dir,
            mouth_open: snap.agent.mouth_open,
        },
    );
    for ghost in &snap.adversaries {
        place(ghost.pos, Glyph::Ghost(ghost.color));
    }

    rows
}

#[derive(Debug, Default)]
pub struct BoardView;

impl BoardView {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snap: &Snapshot<'_>, fps: Option<u32>) {
        let chunks = Layout::default()
            .direction(Axis::Vertical)
            .constraints([
                Constraint::Length(1), // Score / lives
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Controls
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snap, fps), chunks[0]);
        frame.render_widget(self.render_board(snap), chunks[1]);
        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_board(&self, snap: &Snapshot<'_>) -> Paragraph<'static> {
        let lines: Vec<Line> = glyph_rows(snap)
            .into_iter()
            .map(|row| Line::from(row.into_iter().map(Glyph::span).collect::<Vec<_>>()))
            .collect();

        let (title, color) = match snap.outcome {
            None => (" Maze Chomp ", Color::White),
            Some(Outcome::Won) => (" YOU WIN! ", Color::Green),
            Some(Outcome::Lost) => (" GAME OVER ", Color::Red),
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(color))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snap: &Snapshot<'_>, fps: Option<u32>) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

        let mut spans = vec![
            Span::styled("Score: ", label),
            Span::styled(snap.score.to_string(), value),
            Span::raw("    "),
            Span::styled("Lives: ", label),
            Span::styled(snap.lives.to_string(), value),
            Span::raw("    "),
            Span::styled("Pellets: ", label),
            Span::styled(snap.pellets_left.to_string(), value),
        ];
        if let Some(fps) = fps {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(format!("{fps} FPS"), Style::default().fg(Color::DarkGray)));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let line = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(line).alignment(Alignment::Center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAP_COLS, MAP_ROWS, TILE_SIZE};
    use crate::sim::GameSession;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_glyphs_follow_tiles_and_entities() {
        let session = GameSession::new(1);
        let rows = glyph_rows(&session.snapshot());
        assert_eq!(rows.len(), MAP_ROWS);
        assert_eq!(rows[0].len(), MAP_COLS);
        assert_eq!(rows[0][0], Glyph::Wall);
        assert_eq!(rows[1][1], Glyph::Pellet);
        assert_eq!(
            rows[16][9],
            Glyph::Agent {
                dir: Direction::Right,
                mouth_open: true
            }
        );
        assert_eq!(rows[8][9], Glyph::Ghost(Rgb::RED));
        assert_eq!(rows[10][10], Glyph::Ghost(Rgb::ORANGE));
    }

    #[test]
    fn test_tunnel_overhang_is_not_drawn() {
        let mut session = GameSession::new(1);
        session.agent.motion.pos = IVec2::new(-TILE_SIZE / 3, 10 * TILE_SIZE + TILE_SIZE / 2);
        let rows = glyph_rows(&session.snapshot());
        assert!(
            rows.iter()
                .flatten()
                .all(|g| !matches!(g, Glyph::Agent { .. }))
        );
    }

    #[test]
    fn test_agent_symbols() {
        assert_eq!(agent_symbol(Direction::Left, true), "Ɔ ");
        assert_eq!(agent_symbol(Direction::None, true), "C ");
        assert_eq!(agent_symbol(Direction::Up, false), "O ");
    }

    #[test]
    fn test_render_to_test_backend() {
        let session = GameSession::new(1);
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal
            .draw(|frame| BoardView::new().render(frame, &session.snapshot(), Some(60)))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Score: 0"));
        assert!(text.contains("Lives: 3"));
        assert!(text.contains("60 FPS"));
        assert!(text.contains("Maze Chomp"));
    }
}
