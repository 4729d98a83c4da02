use anyhow::{Context, Result, bail};
use dragonsweeper_core::{Click, Coord, Coord2, MouseButtons, PointerInput};

/// One line of an input script.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Click(Click),
    Pointer(PointerInput),
    Show,
    Reset,
}

/// Parses a script line, `None` for blank lines and `#` comments.
///
/// ```text
/// left 3 4        # row col
/// right 0 0
/// both 3 4
/// pointer 75 115 lr
/// idle
/// show
/// reset
/// ```
pub(crate) fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.split('#').next().unwrap_or_default().trim();
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match (verb, args.as_slice()) {
        ("left" | "l", [row, col]) => Command::Click(Click::left(parse_coords(row, col)?)),
        ("right" | "r", [row, col]) => Command::Click(Click::right(parse_coords(row, col)?)),
        ("both" | "b", [row, col]) => Command::Click(Click::both(parse_coords(row, col)?)),
        ("idle", []) => Command::Click(Click::idle()),
        ("pointer" | "p", [x, y, buttons]) => Command::Pointer(PointerInput {
            buttons: parse_buttons(buttons)?,
            x: x.parse().with_context(|| format!("bad x position {x:?}"))?,
            y: y.parse().with_context(|| format!("bad y position {y:?}"))?,
        }),
        ("show", []) => Command::Show,
        ("reset", []) => Command::Reset,
        _ => bail!("unrecognized command {line:?}"),
    };
    Ok(Some(command))
}

fn parse_coords(row: &str, col: &str) -> Result<Coord2> {
    let row: Coord = row.parse().with_context(|| format!("bad row {row:?}"))?;
    let col: Coord = col.parse().with_context(|| format!("bad column {col:?}"))?;
    Ok((row, col))
}

fn parse_buttons(spec: &str) -> Result<MouseButtons> {
    let mut buttons = MouseButtons::empty();
    for c in spec.chars() {
        match c {
            'l' => buttons |= MouseButtons::LEFT,
            'r' => buttons |= MouseButtons::RIGHT,
            '-' => {}
            _ => bail!("bad button {c:?}, expected l, r or -"),
        }
    }
    Ok(buttons)
}
