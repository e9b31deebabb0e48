//! Test fixtures - reusable portal content.

pub const INDEX_HTML: &str = "<!doctype html>\n<html>\n<body>Admin portal</body>\n</html>\n";

pub const INDEX_HTML_V2: &str =
    "<!doctype html>\n<html>\n<body>Admin portal v2</body>\n</html>\n";

/// Passes the test environment's self-test (`grep -q server`)
pub const SITE_CONF: &str = "server {\n    listen 8080;\n    root /var/www/admin-portal;\n}\n";

pub const SITE_CONF_V2: &str = "server {\n    listen 8081;\n    root /var/www/admin-portal;\n}\n";

/// Fails the self-test
pub const BROKEN_CONF: &str = "listen 8080;\n";

pub const LOGO_PNG: &[u8] = b"\x89PNG\r\n\x1a\nnot really a png";

pub const USER_SVG: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\"></svg>\n";

/// Relative to the target root
pub const CONFIG_DEST: &str = "sites/admin-portal";
