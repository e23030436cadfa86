use std::fmt::Write;

use ember_client::projection::{Screen, StreakDetail, StreakRow};
use ember_client::{Notice, NoticeLevel};

pub fn screen(screen: &Screen) -> String {
    let mut out = String::new();
    match screen {
        Screen::Register => {
            let _ = writeln!(out, "🔥 Ember");
            let _ = writeln!(out, "Keep in touch with your friends every day!");
            let _ = writeln!(out, "> register <username> <first name>");
        }
        Screen::Invite { draft } => {
            let _ = writeln!(out, "Invite a friend");
            let _ = writeln!(out, "Enter your friend's username.");
            if !draft.is_empty() {
                let _ = writeln!(out, "(last attempt: {})", draft);
            }
            let _ = writeln!(out, "> invite <username>   |   back");
        }
        Screen::Streaks { greeting, rows } => {
            let _ = writeln!(out, "🔥 Ember, hi {}!", greeting);
            if rows.is_empty() {
                let _ = writeln!(out, "You have no streaks yet.");
                let _ = writeln!(out, "Invite a friend to start one!");
            } else {
                let _ = writeln!(out, "My streaks");
                for (i, row) in rows.iter().enumerate() {
                    let _ = writeln!(out, "{:>3}. {}", i + 1, list_row(row));
                }
            }
        }
        Screen::Detail { greeting, detail: d } => {
            let _ = writeln!(out, "🔥 Ember, hi {}!", greeting);
            detail(&mut out, d);
        }
    }
    out
}

fn list_row(row: &StreakRow) -> String {
    let mut line = format!("{} (@{})  🔥 {}", row.friend_name, row.friend_username, row.days);
    if row.unread > 0 {
        let _ = write!(line, "  [{} unread]", row.unread);
    }
    line
}

fn detail(out: &mut String, d: &StreakDetail) {
    let _ = writeln!(out, "Streak with {}: {}", d.friend_name, days(d.days));
    if d.has_unread {
        let _ = writeln!(out, "You have an unread message");
    }
    if !d.draft.is_empty() {
        let _ = writeln!(out, "draft: {}", d.draft);
    }
    let _ = writeln!(out, "> send <text>");
    if let Some(left) = d.restore {
        let _ = writeln!(out, "> restore   ({} left)", left);
    }
    let _ = writeln!(out, "> back");
}

fn days(n: u32) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", n)
    }
}

pub fn notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Success => format!("✔ {}", notice.message),
        NoticeLevel::Error => format!("✖ {}", notice.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_screen(restore: Option<u8>, days: u32) -> Screen {
        Screen::Detail {
            greeting: "Alice".into(),
            detail: StreakDetail {
                id: 42,
                friend_name: "Bob".into(),
                days,
                has_unread: false,
                restore,
                draft: String::new(),
            },
        }
    }

    #[test]
    fn empty_list_shows_invitation() {
        let text = screen(&Screen::Streaks {
            greeting: "Alice".into(),
            rows: vec![],
        });
        assert!(text.contains("no streaks yet"));
    }

    #[test]
    fn restore_offered_only_with_budget() {
        assert!(screen(&detail_screen(Some(2), 5)).contains("restore   (2 left)"));
        assert!(!screen(&detail_screen(None, 5)).contains("restore"));
    }

    #[test]
    fn singular_day() {
        assert!(screen(&detail_screen(None, 1)).contains("1 day\n"));
        assert!(screen(&detail_screen(None, 0)).contains("0 days"));
    }

    #[test]
    fn rows_show_unread_badge() {
        let text = screen(&Screen::Streaks {
            greeting: "Alice".into(),
            rows: vec![StreakRow {
                id: 1,
                friend_name: "Bob".into(),
                friend_username: "bob".into(),
                days: 4,
                unread: 2,
            }],
        });
        assert!(text.contains("  1. Bob (@bob)  🔥 4  [2 unread]"));
    }
}
