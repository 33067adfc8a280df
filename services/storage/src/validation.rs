// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Naming rules of storage resources.

/// Name of the root container.
pub const ROOT_CONTAINER: &str = "$root";

/// Check a container name.
///
/// - 3 through 63 characters long
/// - only lowercase letters, digits and `-`
/// - starts and ends with a letter or digit, no consecutive `-`
///
/// `$root` addresses the root container and is always valid.
pub fn valid_container_name(name: &str) -> bool {
    name == ROOT_CONTAINER || valid_dns_name(name)
}

/// Check a queue name. Same rules as containers, without `$root`.
pub fn valid_queue_name(name: &str) -> bool {
    valid_dns_name(name)
}

/// Check a table name.
///
/// - 3 through 63 characters long
/// - starts with a letter, followed by letters or digits
pub fn valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    (3..=63).contains(&name.len())
        && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

fn valid_dns_name(name: &str) -> bool {
    (3..=63).contains(&name.len())
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !name.starts_with('-')
        && !name.ends_with('-')
        && !name.contains("--")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("abc", true; "shortest")]
    #[test_case("my-container-01", true; "dashes and digits")]
    #[test_case("$root", true; "root container")]
    #[test_case("ab", false; "too short")]
    #[test_case("-abc", false; "leading dash")]
    #[test_case("abc-", false; "trailing dash")]
    #[test_case("ab--c", false; "consecutive dashes")]
    #[test_case("MyContainer", false; "uppercase")]
    #[test_case("my_container", false; "underscore")]
    fn test_valid_container_name(name: &str, expected: bool) {
        assert_eq!(valid_container_name(name), expected);
    }

    #[test]
    fn test_container_name_length() {
        assert!(valid_container_name(&"a".repeat(63)));
        assert!(!valid_container_name(&"a".repeat(64)));
    }

    #[test]
    fn test_valid_queue_name() {
        assert!(valid_queue_name("orders-2024"));
        assert!(!valid_queue_name("$root"));
        assert!(!valid_queue_name("Orders"));
    }

    #[test_case("Customers", true; "mixed case")]
    #[test_case("t01", true; "digits after letter")]
    #[test_case("1table", false; "leading digit")]
    #[test_case("my-table", false; "dash")]
    #[test_case("ab", false; "too short")]
    fn test_valid_table_name(name: &str, expected: bool) {
        assert_eq!(valid_table_name(name), expected);
    }

    #[test]
    fn test_table_name_length() {
        assert!(valid_table_name(&"t".repeat(63)));
        assert!(!valid_table_name(&"t".repeat(64)));
    }
}
