/// Create a JVM system property argument (`-Dname=value`)
pub fn property_arg(name: &str, value: &str) -> String {
	format!("-D{name}={value}")
}

/// Split a user-written parameter string into separate arguments, the way a shell would
/// for simple cases.
///
/// Arguments are separated by whitespace. Double quotes group text containing whitespace
/// and are removed, and `\"` produces a literal quote. Any other backslash is kept as-is
/// so that Windows paths survive.
///
/// ```
/// use osgirun_core::io::java::args::parse_parameters;
///
/// let args = parse_parameters(r#"-Xmx256m -Dname="hello world""#);
/// assert_eq!(args, vec!["-Xmx256m", "-Dname=hello world"]);
/// ```
pub fn parse_parameters(string: &str) -> Vec<String> {
	let mut out = Vec::new();
	let mut current = String::new();
	// Whether the current token exists even if it is empty, such as with ""
	let mut has_token = false;
	let mut in_quotes = false;

	let mut chars = string.chars().peekable();
	while let Some(c) = chars.next() {
		match c {
			'\\' if chars.peek() == Some(&'"') => {
				chars.next();
				current.push('"');
				has_token = true;
			}
			'"' => {
				in_quotes = !in_quotes;
				has_token = true;
			}
			c if c.is_whitespace() && !in_quotes => {
				if has_token {
					out.push(std::mem::take(&mut current));
					has_token = false;
				}
			}
			c => {
				current.push(c);
				has_token = true;
			}
		}
	}

	if has_token {
		out.push(current);
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_property_arg() {
		assert_eq!(
			property_arg("org.osgi.framework.bootdelegation", "sun.*,com.sun.*"),
			"-Dorg.osgi.framework.bootdelegation=sun.*,com.sun.*"
		);
	}

	#[test]
	fn test_parse_simple() {
		assert_eq!(
			parse_parameters("  -Xmx256m\t-ea \n -server "),
			vec!["-Xmx256m", "-ea", "-server"]
		);
		assert!(parse_parameters("").is_empty());
		assert!(parse_parameters("   ").is_empty());
	}

	#[test]
	fn test_parse_quotes() {
		assert_eq!(
			parse_parameters(r#""C:\Program Files\app" -Dx="a b"c"#),
			vec![r"C:\Program Files\app", "-Dx=a bc"]
		);
		assert_eq!(parse_parameters(r#"-a "" -b"#), vec!["-a", "", "-b"]);
	}

	#[test]
	fn test_parse_escaped_quote() {
		assert_eq!(
			parse_parameters(r#"-Dmsg=\"hi\" "say \"yes\"""#),
			vec![r#"-Dmsg="hi""#, r#"say "yes""#]
		);
	}

	#[test]
	fn test_parse_unterminated_quote() {
		assert_eq!(parse_parameters(r#"-a "b c"#), vec!["-a", "b c"]);
	}
}
