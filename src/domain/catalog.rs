use crate::domain::models::ServiceEntry;

pub struct BuiltinService {
    pub name: &'static str,
    pub description: &'static str,
    pub binary: &'static str,
    pub args: &'static [&'static str],
    pub profile: &'static str,
    pub whitelist: &'static [&'static str],
}

/// Menu order. Every daemon is started in the foreground form so firejail keeps it as its child.
pub const BUILTIN_SERVICES: &[BuiltinService] = &[
    BuiltinService {
        name: "sshd",
        description: "OpenSSH server",
        binary: "/usr/sbin/sshd",
        args: &["-D"],
        profile: "sshd",
        whitelist: &["/etc/ssh", "/run/sshd"],
    },
    BuiltinService {
        name: "named",
        description: "BIND DNS server",
        binary: "/usr/sbin/named",
        args: &["-f", "-u", "bind"],
        profile: "named",
        whitelist: &["/etc/bind", "/var/cache/bind", "/run/named"],
    },
    BuiltinService {
        name: "apache2",
        description: "Apache HTTP server",
        binary: "/usr/sbin/apache2ctl",
        args: &["-D", "FOREGROUND"],
        profile: "apache2",
        whitelist: &["/etc/apache2", "/var/www", "/var/log/apache2", "/run/apache2"],
    },
    BuiltinService {
        name: "nginx",
        description: "nginx HTTP server",
        binary: "/usr/sbin/nginx",
        args: &["-g", "daemon off;"],
        profile: "nginx",
        whitelist: &["/etc/nginx", "/var/www", "/var/log/nginx", "/var/lib/nginx"],
    },
    BuiltinService {
        name: "mysqld",
        description: "MySQL/MariaDB server",
        binary: "/usr/sbin/mysqld",
        args: &[],
        profile: "mysqld",
        whitelist: &["/etc/mysql", "/var/lib/mysql", "/run/mysqld"],
    },
    BuiltinService {
        name: "vsftpd",
        description: "vsftpd FTP server",
        binary: "/usr/sbin/vsftpd",
        args: &[],
        profile: "vsftpd",
        whitelist: &["/etc/vsftpd.conf", "/srv/ftp"],
    },
    BuiltinService {
        name: "postfix",
        description: "Postfix mail server",
        binary: "/usr/sbin/postfix",
        args: &["start-fg"],
        profile: "postfix",
        whitelist: &["/etc/postfix", "/var/spool/postfix"],
    },
    BuiltinService {
        name: "smbd",
        description: "Samba file server",
        binary: "/usr/sbin/smbd",
        args: &["--foreground", "--no-process-group"],
        profile: "smbd",
        whitelist: &["/etc/samba", "/var/lib/samba", "/srv/samba"],
    },
    BuiltinService {
        name: "dhcpd",
        description: "ISC DHCP server",
        binary: "/usr/sbin/dhcpd",
        args: &["-f"],
        profile: "dhcpd",
        whitelist: &["/etc/dhcp", "/var/lib/dhcp"],
    },
    BuiltinService {
        name: "cupsd",
        description: "CUPS print server",
        binary: "/usr/sbin/cupsd",
        args: &["-f"],
        profile: "cupsd",
        whitelist: &["/etc/cups", "/var/spool/cups"],
    },
    BuiltinService {
        name: "unbound",
        description: "Unbound DNS resolver",
        binary: "/usr/sbin/unbound",
        args: &["-d"],
        profile: "unbound",
        whitelist: &["/etc/unbound"],
    },
];

impl BuiltinService {
    pub fn to_entry(&self) -> ServiceEntry {
        ServiceEntry {
            name: self.name.to_string(),
            description: self.description.to_string(),
            binary: self.binary.to_string(),
            args: self.args.iter().map(|a| a.to_string()).collect(),
            profile: Some(self.profile.to_string()),
            whitelist: self.whitelist.iter().map(|w| w.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BUILTIN_SERVICES;
    use std::collections::HashSet;

    #[test]
    fn builtin_names_are_unique() {
        let mut seen = HashSet::new();
        for s in BUILTIN_SERVICES {
            assert!(seen.insert(s.name), "duplicate service {}", s.name);
        }
    }

    #[test]
    fn builtin_binaries_are_absolute() {
        for s in BUILTIN_SERVICES {
            assert!(s.binary.starts_with('/'), "{} binary not absolute", s.name);
        }
    }

    #[test]
    fn sshd_is_first_and_stays_in_foreground() {
        let first = &BUILTIN_SERVICES[0];
        assert_eq!(first.name, "sshd");
        assert_eq!(first.args, &["-D"]);
    }
}
