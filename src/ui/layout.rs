use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    pub tabs: Rect,
    pub main: Rect,
    pub status_line: Rect,
    pub command_line: Rect,
}

pub fn areas(size: Rect) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    let footer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(vertical[3]);

    UiAreas {
        size,
        header: vertical[0],
        tabs: vertical[1],
        main: vertical[2],
        status_line: footer_chunks[0],
        command_line: footer_chunks[1],
    }
}

/// A box of `width` x `height` cells centered in `r`, clipped to `r`
pub fn centered_box(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_areas_stack_vertically() {
        let areas = areas(Rect::new(0, 0, 100, 40));
        assert_eq!(areas.header.height, 3);
        assert_eq!(areas.tabs.y, 3);
        assert_eq!(areas.main.height, 34);
        assert_eq!(areas.command_line.y, 39);
    }

    #[test]
    fn test_centered_box_is_clipped() {
        let r = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_box(10, 4, r), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_box(50, 50, r), r);
    }
}
