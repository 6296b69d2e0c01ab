use crate::domain::models::{LaunchReport, ServiceEntry};
use crate::services::launcher::{launch_background, JailOptions};
use crate::services::runner::CommandRunner;
use std::io::{BufRead, Write};

#[derive(Debug, PartialEq, Eq)]
pub enum Choice {
    Service(usize),
    All,
    Quit,
    Invalid,
}

/// `1..=count` selects a service, `a` launches all, `q` quits.
pub fn parse_choice(input: &str, count: usize) -> Choice {
    let input = input.trim();
    match input.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => return Choice::Quit,
        "a" | "all" => return Choice::All,
        _ => {}
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Choice::Service(n - 1),
        _ => Choice::Invalid,
    }
}

fn render_menu(out: &mut dyn Write, services: &[ServiceEntry]) -> std::io::Result<()> {
    writeln!(out, "Select a service to start inside firejail:")?;
    for (i, s) in services.iter().enumerate() {
        if s.description.is_empty() {
            writeln!(out, "  {:>2}) {}", i + 1, s.name)?;
        } else {
            writeln!(out, "  {:>2}) {:<10} {}", i + 1, s.name, s.description)?;
        }
    }
    writeln!(out, "   a) start all")?;
    writeln!(out, "   q) quit")
}

fn report_line(out: &mut dyn Write, r: &LaunchReport) -> std::io::Result<()> {
    match (&r.error, r.pid) {
        (Some(err), _) => writeln!(out, "{}: failed: {}", r.service, err),
        (None, Some(pid)) => writeln!(out, "{}: started (pid {}): {}", r.service, pid, r.command),
        (None, None) => writeln!(out, "{}: {}: {}", r.service, r.status, r.command),
    }
}

/// Interactive loop. Every selection is started in the background and the
/// prompt comes back; end of input behaves like `q`.
pub fn run_menu(
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    runner: &dyn CommandRunner,
    services: &[ServiceEntry],
    jail: &JailOptions<'_>,
) -> anyhow::Result<Vec<LaunchReport>> {
    let mut launched = Vec::new();
    render_menu(out, services)?;
    loop {
        runner.reap();
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let batch: Vec<&ServiceEntry> = match parse_choice(&line, services.len()) {
            Choice::Quit => break,
            Choice::Invalid => {
                writeln!(out, "invalid option: {}", line.trim())?;
                continue;
            }
            Choice::All => services.iter().collect(),
            Choice::Service(i) => vec![&services[i]],
        };
        for service in batch {
            let report = launch_background(runner, service, jail);
            report_line(out, &report)?;
            launched.push(report);
        }
    }
    Ok(launched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::config::merge_services;
    use crate::services::runner::DryRunner;
    use crate::services::runner::CommandLine;
    use std::cell::Cell;
    use std::io::Cursor;

    #[derive(Default)]
    struct ReapCounter {
        reaps: Cell<usize>,
    }

    impl CommandRunner for ReapCounter {
        fn run(&self, _cmd: &CommandLine) -> anyhow::Result<i32> {
            Ok(0)
        }

        fn spawn(&self, _cmd: &CommandLine) -> anyhow::Result<Option<u32>> {
            Ok(Some(1))
        }

        fn reap(&self) -> usize {
            self.reaps.set(self.reaps.get() + 1);
            0
        }
    }

    const JAIL: JailOptions<'static> = JailOptions {
        firejail_bin: "firejail",
        firejail_args: &[],
        use_sudo: true,
    };

    #[test]
    fn parse_choice_bounds() {
        assert_eq!(parse_choice("1\n", 3), Choice::Service(0));
        assert_eq!(parse_choice(" 3 ", 3), Choice::Service(2));
        assert_eq!(parse_choice("0", 3), Choice::Invalid);
        assert_eq!(parse_choice("4", 3), Choice::Invalid);
        assert_eq!(parse_choice("nginx", 3), Choice::Invalid);
        assert_eq!(parse_choice("A", 3), Choice::All);
        assert_eq!(parse_choice("q", 3), Choice::Quit);
    }

    #[test]
    fn menu_launches_selection_and_reprompts() {
        let services = merge_services(&[]);
        let runner = DryRunner::new();
        let mut input = Cursor::new("1\nbogus\n4\nq\n");
        let mut out = Vec::new();

        let launched = run_menu(&mut input, &mut out, &runner, &services, &JAIL).expect("menu");

        assert_eq!(launched.len(), 2);
        assert_eq!(launched[0].service, "sshd");
        assert_eq!(launched[1].service, "nginx");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("invalid option: bogus"));
        assert!(text.contains("sshd: planned: sudo firejail /usr/sbin/sshd -D"));
        assert_eq!(text.matches("> ").count(), 4);
    }

    #[test]
    fn all_launches_every_service_then_eof_quits() {
        let services = merge_services(&[]);
        let runner = DryRunner::new();
        let mut input = Cursor::new("a\n");
        let mut out = Vec::new();

        let launched = run_menu(&mut input, &mut out, &runner, &services, &JAIL).expect("menu");

        assert_eq!(launched.len(), services.len());
        assert_eq!(runner.recorded().len(), services.len());
    }

    #[test]
    fn finished_children_are_reaped_before_each_prompt() {
        let services = merge_services(&[]);
        let runner = ReapCounter::default();
        let mut input = Cursor::new("1\n2\nq\n");
        let mut out = Vec::new();

        run_menu(&mut input, &mut out, &runner, &services, &JAIL).expect("menu");

        assert_eq!(runner.reaps.get(), 3);
    }
}
