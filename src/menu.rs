use crate::command::Command;
use crate::consts;
use crate::util::{center_rect, EnumExt};
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct MainMenu {
    selection: MenuOption,
}

impl MainMenu {
    #[allow(clippy::cast_possible_truncation)]
    const HEIGHT: u16 = (MenuOption::LENGTH as u16) + 2 /* for border */;
    const HORIZONTAL_PADDING: u16 = 1; // padding on each side
    const POINTER_WIDTH: u16 = 2;
    const WIDTH: u16 = 2 /* for border */ + 2 * Self::HORIZONTAL_PADDING + Self::POINTER_WIDTH + MenuOption::DISPLAY_WIDTH;

    pub(crate) fn new() -> MainMenu {
        MainMenu::default()
    }

    /// Respond to a keypress.  Returns the chosen item, if any.
    pub(crate) fn handle_command(&mut self, cmd: Command) -> Option<MenuOption> {
        match cmd {
            Command::One => return Some(MenuOption::Start),
            Command::Two => return Some(MenuOption::Scores),
            Command::Three | Command::Q => return Some(MenuOption::Exit),
            Command::Enter => return Some(self.selection),
            Command::Up => {
                if let Some(sel) = self.selection.prev() {
                    self.selection = sel;
                }
            }
            Command::Down => {
                if let Some(sel) = self.selection.next() {
                    self.selection = sel;
                }
            }
            Command::Next => {
                self.selection = self.selection.next().unwrap_or_else(MenuOption::min);
            }
            Command::Prev => {
                self.selection = self.selection.prev().unwrap_or_else(MenuOption::max);
            }
            _ => (),
        }
        None
    }
}

impl Widget for &MainMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = center_rect(
            area,
            Size {
                width: MainMenu::WIDTH,
                height: MainMenu::HEIGHT + 2,
            },
        );
        let [menu_area, hint_area] = Layout::vertical([MainMenu::HEIGHT, 1])
            .flex(Flex::Start)
            .spacing(1)
            .areas(area);

        let block = Block::bordered()
            .title(Line::styled(" SNAKE ", consts::TITLE_STYLE))
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(MainMenu::HORIZONTAL_PADDING));
        let items_area = block.inner(menu_area);
        block.render(menu_area, buf);
        for (opt, row) in MenuOption::iter().zip(items_area.rows()) {
            let (pointer, style) = if opt == self.selection {
                ("» ", consts::MENU_SELECTION_STYLE)
            } else {
                ("  ", Style::new())
            };
            Line::from_iter([
                Span::styled(pointer, style),
                Span::styled(opt.key().to_string(), consts::KEY_STYLE.patch(style)),
                Span::styled(format!(". {}", opt.label()), style),
            ])
            .render(row, buf);
        }

        Line::from_iter([Span::raw("Quit: "), Span::styled("Ctrl-C", consts::KEY_STYLE)])
            .centered()
            .render(hint_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Default, Enum, Eq, PartialEq)]
pub(crate) enum MenuOption {
    #[default]
    Start,
    Scores,
    Exit,
}

impl MenuOption {
    /// Width of the widest "N. Label" item
    const DISPLAY_WIDTH: u16 = 14;

    fn key(self) -> char {
        match self {
            MenuOption::Start => '1',
            MenuOption::Scores => '2',
            MenuOption::Exit => '3',
        }
    }

    fn label(self) -> &'static str {
        match self {
            MenuOption::Start => "Start Game",
            MenuOption::Scores => "View Scores",
            MenuOption::Exit => "Exit",
        }
    }
}
