use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct QuizLayout {
    pub header_area: Rect,
    pub question_area: Rect,
    pub answer_area: Rect,
    pub reveal_area: Rect,
    pub notice_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_quiz_chunks(area: Rect) -> QuizLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(35),
            Constraint::Min(6),
            Constraint::Percentage(25),
            Constraint::Length(1),
            Constraint::Length(4),
        ])
        .split(area);

    QuizLayout {
        header_area: chunks[0],
        question_area: chunks[1],
        answer_area: chunks[2],
        reveal_area: chunks[3],
        notice_area: chunks[4],
        help_area: chunks[5],
    }
}

/// A `width` x `height` box centered in `area`, clamped to it.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_layout() {
        let layout = calculate_quiz_chunks(Rect::new(0, 0, 100, 60));
        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.notice_area.height, 1);
        assert_eq!(layout.help_area.height, 4);
        assert!(layout.question_area.height > 0);
        assert!(layout.answer_area.height >= 6);
        assert!(layout.reveal_area.height > 0);
        assert!(layout.question_area.y < layout.answer_area.y);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        let r = centered_rect(area, 40, 10);
        assert_eq!(r, Rect::new(30, 15, 40, 10));
        let clamped = centered_rect(area, 200, 50);
        assert_eq!(clamped, area);
    }
}
