//! Authored scripts for the long-running commands.

use cforce_models::{Exposure, Line};
use rand::Rng;

use crate::config::EngineConfig;
use crate::script::{Effect, Finish, FloodPlan, Sequence, SequenceBuilder};
use crate::target::{clean_target, derive_username};

/// Module the exploit chain selects.
pub const CHAIN_MODULE: &str = "exploit/multi/http/apache_normalize_path";

/// Password the enumeration brute force finds on lab targets.
pub const WP_PASSWORD: &str = "P@ssw0rd123";

/// Password the SSH brute force finds on lab targets.
pub const SSH_PASSWORD: &str = "master";

/// Dumped hash shown by `hashdump`.
pub const ROOT_HASH: &str =
    "root:$6$rounds=5000$Usesomesillystring$D4I06s.f.:0:0:root:/root:/bin/bash";

const ROOT_PROMPT: &str = "root@cforce:~#";

const RULE: usize = 60;

const FLOOD_BANNER: &str = "\
╔══════════════════════════════════════════════════════════╗
║           E X A D O S   S U P E R   D D O S   V 3 0      ║
║           WITH VIP & TLS ADVANCED METHODS                ║
║           TRAFFIC SIMULATION - NO PACKETS ARE SENT       ║
╚══════════════════════════════════════════════════════════╝";

const FLOOD_MENU: &str = "\
[STANDARD METHODS]
[1] HTTP-GET Flood       [2] HTTP-POST Flood
[5] TCP SYN Flood        [6] UDP Flood
[ADVANCED METHODS]
[11] GFLOOD Bypass       [14] L4 TCP Flood
[VIP & TLS METHODS]
[17] TLS-HELLO Flood     [18] VIP Method
[20] VIP-TLS Combo";

/// Passive scan. Finishes by populating the findings list.
pub fn scan(target: &str) -> Sequence {
    SequenceBuilder::new("scan")
        .pause(100)
        .emit(Line::system(format!("[*] Starting passive scan on {}", target)))
        .pause(700)
        .emit(Line::plain("[+] Resolving DNS..."))
        .pause(700)
        .emit(Line::plain("[+] Checking port reachability..."))
        .pause(700)
        .emit(Line::plain("[*] Banner grabbing active..."))
        .pause(800)
        .emit(Line::warning(
            "[!] WARN: Suspicious header detected (Apache/2.4.49)",
        ))
        .pause(1000)
        .emit(Line::plain("[+] Analyzing SSL/TLS chain..."))
        .pause(1000)
        .emit(Line::plain("[+] Correlating with CVE database..."))
        .pause(1000)
        .emit(Line::error("[!] CRITICAL: CVE-2021-41773 CONFIRMED"))
        .pause(1000)
        .emit(Line::success("[*] Scan finished. Report generated."))
        .finish(Finish::Findings)
}

/// Delayed verdict of `check`.
pub fn check(target: &str, exposure: Exposure) -> Sequence {
    let verdict = match exposure {
        Exposure::Vulnerable => {
            Line::success(format!("[+] {}:80 - The target is vulnerable.", target))
        }
        Exposure::Hardened => {
            Line::error(format!("[-] {}:80 - The target is NOT vulnerable.", target))
        }
    };

    SequenceBuilder::new("check")
        .pause(1000)
        .emit(verdict)
        .finish(Finish::Idle)
}

/// Delayed outcome of `exploit`/`run`.
pub fn exploit(target: &str, lhost: &str, exposure: Exposure) -> Sequence {
    let builder = SequenceBuilder::new("exploit").pause(1500);

    let builder = match exposure {
        Exposure::Vulnerable => builder
            .emit(Line::success(format!(
                "[+] Meterpreter session 1 opened ({}:4444 -> {}:56732)",
                lhost, target
            )))
            .effect(Effect::OpenSession("1".to_string())),
        Exposure::Hardened => builder
            .emit(Line::error(
                "[-] Exploit failed: Connection timed out. Target may be patched or behind WAF.",
            ))
            .emit(Line::system(
                "[*] Exploit completed, but no session was created.",
            )),
    };

    builder.finish(Finish::Idle)
}

/// Delayed hash dump in the interactive session.
pub fn hashdump() -> Sequence {
    SequenceBuilder::new("hashdump")
        .pause(1000)
        .emit(Line::plain(ROOT_HASH))
        .finish(Finish::Idle)
}

/// Where the exploit chain starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStart {
    /// Framework must be launched first.
    Shell,
    /// An interactive session must be backgrounded first.
    Session,
    /// Already in the framework console.
    Console,
}

/// Full exploit run replayed as simulated input.
pub fn exploit_chain(target: &str, start: ChainStart) -> Sequence {
    let builder = SequenceBuilder::new("exploit-chain");
    let builder = match start {
        ChainStart::Shell => builder.input("msfconsole").pause(1200),
        ChainStart::Session => builder.input("background").pause(500),
        ChainStart::Console => builder,
    };

    builder
        .pause(500)
        .input(format!("use {}", CHAIN_MODULE))
        .pause(800)
        .input(format!("set RHOSTS {}", clean_target(target)))
        .pause(800)
        .input("check")
        .pause(1500)
        .input("run")
        .finish(Finish::Idle)
}

/// Enumeration followed by a password attack on the web login.
pub fn wpscan<R: Rng + ?Sized>(target: &str, exposure: Exposure, rng: &mut R) -> Sequence {
    let host = clean_target(target);
    let user = derive_username(target);
    let vulnerable = exposure.is_vulnerable();

    let mut builder = SequenceBuilder::new("wpscan")
        .emit(Line::input(format!(
            "{} wpscan --url http://{} --enumerate u",
            ROOT_PROMPT, host
        )))
        .pause(1000)
        .emit(Line::plain("_".repeat(RULE)))
        .emit(Line::plain("        WordPress Security Scanner (simulated)"))
        .emit(Line::plain("_".repeat(RULE)))
        .emit(Line::plain(format!("[+] URL: http://{}/", host)))
        .pause(1000);

    builder = if vulnerable {
        builder
            .emit(Line::system("[i] User(s) Identified:"))
            .emit(Line::warning(format!("[+] {}", user)))
            .emit(Line::plain(" | ID: 1"))
    } else {
        builder
            .emit(Line::warning("[!] Passive enumeration incomplete."))
            .emit(Line::system(format!(
                "[!] Attempting brute force on detected author archive: '{}'",
                user
            )))
            .pause(1500)
            .emit(Line::system("[i] User(s) Identified:"))
            .emit(Line::warning(format!("[+] {}", user)))
    };

    builder = builder
        .pause(1500)
        .emit(Line::input(format!(
            "{} wpscan --url http://{} --usernames {} --passwords /usr/share/wordlists/rockyou.txt",
            ROOT_PROMPT, host, user
        )))
        .pause(1000)
        .emit(Line::system(
            "[+] Performing password attack on Wp-Login against 1 user/s",
        ))
        .emit(Line::plain("[+] Wordlist: rockyou.txt"))
        .pause(1000);

    let candidates = [
        "123456".to_string(),
        "password".to_string(),
        format!("{}123", user),
        WP_PASSWORD.to_string(),
        "welcome1".to_string(),
        "letmein".to_string(),
    ];

    for candidate in &candidates {
        builder = builder.pause(rng.gen_range(200..500));
        if vulnerable && candidate == WP_PASSWORD {
            return builder
                .emit(Line::success(format!(
                    "[SUCCESS] Password found! {} : {}",
                    user, candidate
                )))
                .emit(Line::system("[*] Scan finished with 1 credential(s)."))
                .finish(Finish::Idle);
        }
        builder = builder.emit(Line::error(format!(
            "[ATTEMPT] {} : {} ... Failed",
            user, candidate
        )));
    }

    builder
        .emit(Line::error(
            "[!] Reached end of wordlist. No valid credentials found.",
        ))
        .finish(Finish::Idle)
}

/// SSH password attack.
pub fn hydra<R: Rng + ?Sized>(target: &str, exposure: Exposure, rng: &mut R) -> Sequence {
    let host = clean_target(target);
    let vulnerable = exposure.is_vulnerable();
    let candidates = ["123456", "password", "root", "admin", "qwerty", SSH_PASSWORD];

    let mut builder = SequenceBuilder::new("hydra")
        .emit(Line::input(format!(
            "{} hydra -l root -P /usr/share/wordlists/rockyou.txt ssh://{}",
            ROOT_PROMPT, host
        )))
        .pause(1000)
        .emit(Line::system("Hydra v9.1 (c) 2020 by van Hauser/THC - simulated run"))
        .pause(500)
        .emit(Line::plain(format!(
            "[DATA] max 16 tasks, 1 server, {} login tries (l:1/p:{}), ~1 tries per task",
            candidates.len(),
            candidates.len()
        )))
        .emit(Line::plain(format!("[DATA] attacking ssh://{}:22/", host)))
        .pause(1000);

    for candidate in candidates {
        builder = builder.pause(rng.gen_range(400..800));
        if vulnerable && candidate == SSH_PASSWORD {
            return builder
                .emit(Line::success(format!(
                    "[22][ssh] host: {}   login: root   password: {}",
                    host, candidate
                )))
                .emit(Line::system("[STATUS] attack finished: 1 valid password found"))
                .finish(Finish::Idle);
        }
        builder = builder.emit(Line::error(format!(
            "[ATTEMPT] target {} - login \"root\" - pass \"{}\" - failed",
            host, candidate
        )));
    }

    builder
        .emit(Line::warning("[DATA] 0 valid passwords found"))
        .finish(Finish::Idle)
}

/// Flood prelude plus loop parameters.
pub fn flood(target: &str, config: &EngineConfig) -> FloodPlan {
    let host = clean_target(target);
    let secs = config.flood_duration.as_secs();
    let rule = "=".repeat(RULE);

    let prelude = SequenceBuilder::new("flood-prelude")
        .emit(Line::input(format!("{} python3 exados.py", ROOT_PROMPT)))
        .pause(800)
        .clear_screen()
        .emit(Line::error(FLOOD_BANNER))
        .pause(800)
        .emit(Line::plain("Welcome to EXADOS SUPER DDoS Tool v30.0"))
        .emit(Line::warning(rule.clone()))
        .emit(Line::error("VIP & TLS EDITION - SIMULATION ONLY"))
        .emit(Line::warning(rule.clone()))
        .pause(500)
        .emit(Line::plain(FLOOD_MENU))
        .pause(1000)
        .emit(Line::input("[?] Select attack method (0-20): 20"))
        .pause(500)
        .emit(Line::warning("[+] Selected: VIP-TLS Combo"))
        .pause(500)
        .emit(Line::input(format!("[?] Enter target URL: http://{}", host)))
        .pause(500)
        .emit(Line::input("[?] Number of threads (1-2000): 1000"))
        .pause(500)
        .emit(Line::input(format!("[?] Attack duration in seconds: {}", secs)))
        .pause(500)
        .emit(Line::input("[?] Power level (1-100): 100"))
        .pause(800)
        .emit(Line::input("[?] Confirm attack? (yes/no): yes"))
        .pause(500)
        .emit(Line::success("[+] Starting SUPER attack with 1000 threads..."))
        .emit(Line::success(format!("[+] Target: http://{}", host)))
        .emit(Line::success(format!("[+] Duration: {} seconds", secs)))
        .emit(Line::success("[+] Method: VIP-TLS Combo"))
        .emit(Line::success("[+] Power Level: 100/100"))
        .emit(Line::plain(rule))
        .pause(1000)
        .emit(Line::system("[+] Launching threads..."))
        .finish(Finish::Idle);

    FloodPlan {
        prelude,
        tick: config.flood_tick,
        duration: config.flood_duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cforce_models::LineKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn emitted(seq: &Sequence) -> Vec<&Line> {
        seq.cues
            .iter()
            .filter_map(|c| match &c.effect {
                Effect::Emit(line) => Some(line),
                _ => None,
            })
            .collect()
    }

    fn count_kind(seq: &Sequence, kind: LineKind) -> usize {
        emitted(seq).iter().filter(|l| l.kind == kind).count()
    }

    #[test]
    fn test_scan_timing_and_finish() {
        let seq = scan("example.com");
        assert_eq!(seq.cues.len(), 9);
        assert_eq!(seq.cues[0].delay, Duration::from_millis(100));
        assert_eq!(seq.duration(), Duration::from_millis(7000));
        assert_eq!(seq.finish, Finish::Findings);
    }

    #[test]
    fn test_check_verdicts() {
        let good = check("demo", Exposure::Vulnerable);
        assert_eq!(count_kind(&good, LineKind::Success), 1);
        assert_eq!(good.cues[0].delay, Duration::from_millis(1000));

        let bad = check("example.com", Exposure::Hardened);
        assert_eq!(count_kind(&bad, LineKind::Success), 0);
        assert_eq!(count_kind(&bad, LineKind::Error), 1);
    }

    #[test]
    fn test_exploit_outcomes() {
        let good = exploit("10.0.0.7", "10.0.0.5", Exposure::Vulnerable);
        assert!(emitted(&good)[0].text.contains("session 1 opened"));

        let bad = exploit("example.com", "10.0.0.5", Exposure::Hardened);
        assert!(emitted(&bad)[0].text.contains("behind WAF"));
    }

    #[test]
    fn test_wpscan_hardened_has_no_success() {
        let mut rng = StdRng::seed_from_u64(3);
        let seq = wpscan("example.com", Exposure::Hardened, &mut rng);

        assert_eq!(count_kind(&seq, LineKind::Success), 0);
        let attempts = emitted(&seq)
            .iter()
            .filter(|l| l.text.starts_with("[ATTEMPT]"))
            .count();
        assert_eq!(attempts, 6);
        assert!(emitted(&seq)
            .iter()
            .any(|l| l.text.contains("example123")));
    }

    #[test]
    fn test_wpscan_lab_stops_at_password() {
        let mut rng = StdRng::seed_from_u64(3);
        let seq = wpscan("test.local", Exposure::Vulnerable, &mut rng);

        let lines = emitted(&seq);
        let success: Vec<_> = lines
            .iter()
            .filter(|l| l.kind == LineKind::Success)
            .collect();
        assert_eq!(success.len(), 1);
        assert!(success[0].text.contains(WP_PASSWORD));

        let attempts = lines
            .iter()
            .filter(|l| l.text.starts_with("[ATTEMPT]"))
            .count();
        assert_eq!(attempts, 3);
    }

    #[test]
    fn test_jitter_within_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let seq = hydra("example.com", Exposure::Hardened, &mut rng);

        let attempt_delays: Vec<Duration> = seq
            .cues
            .iter()
            .filter(|c| matches!(&c.effect, Effect::Emit(l) if l.text.starts_with("[ATTEMPT]")))
            .map(|c| c.delay)
            .collect();
        assert_eq!(attempt_delays.len(), 6);

        // The first attempt also carries the pause after the banner.
        assert!(attempt_delays[0] >= Duration::from_millis(1400));
        assert!(attempt_delays[0] < Duration::from_millis(1800));
        for delay in &attempt_delays[1..] {
            assert!(*delay >= Duration::from_millis(400));
            assert!(*delay < Duration::from_millis(800));
        }
    }

    #[test]
    fn test_hydra_lab_success_replaces_last_attempt() {
        let mut rng = StdRng::seed_from_u64(5);
        let seq = hydra("demo.local", Exposure::Vulnerable, &mut rng);
        let lines = emitted(&seq);

        assert_eq!(count_kind(&seq, LineKind::Success), 1);
        assert_eq!(
            lines
                .iter()
                .filter(|l| l.text.starts_with("[ATTEMPT]"))
                .count(),
            5
        );
        assert!(lines.iter().any(|l| l.text.contains("password: master")));
    }

    #[test]
    fn test_chain_from_shell_launches_framework() {
        let seq = exploit_chain("http://demo.local/", ChainStart::Shell);
        let inputs: Vec<&str> = seq
            .cues
            .iter()
            .filter_map(|c| match &c.effect {
                Effect::Input(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            inputs,
            vec![
                "msfconsole",
                "use exploit/multi/http/apache_normalize_path",
                "set RHOSTS demo.local",
                "check",
                "run",
            ]
        );
    }

    #[test]
    fn test_flood_plan_uses_config() {
        let config = EngineConfig::new()
            .with_flood_tick(Duration::from_millis(20))
            .with_flood_duration(Duration::from_secs(2));
        let plan = flood("https://target.example/", &config);

        assert_eq!(plan.tick, Duration::from_millis(20));
        assert_eq!(plan.ticks(), 100);
        assert!(plan
            .prelude
            .cues
            .iter()
            .any(|c| c.effect == Effect::ClearScreen));
        assert!(emitted(&plan.prelude)
            .iter()
            .any(|l| l.text == "[+] Target: http://target.example"));
    }
}
