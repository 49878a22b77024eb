use std::{fmt, result, str::FromStr};

pub fn match_ignore_case<T: Copy>(input: &str, cases: &[(&[&str], T)]) -> Option<T> {
    for (matches, value) in cases {
        if matches
            .iter()
            .any(|expected| expected.eq_ignore_ascii_case(input))
        {
            return Some(*value);
        }
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Day {
    Mo,
    Tu,
    We,
    Th,
    Fr,
}

impl FromStr for Day {
    type Err = ();

    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        match_ignore_case(
            s,
            &[
                (&["mo"], Day::Mo),
                (&["tu"], Day::Tu),
                (&["we"], Day::We),
                (&["th"], Day::Th),
                (&["fr"], Day::Fr),
            ],
        )
        .ok_or(())
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Day::Mo => "MO",
            Day::Tu => "TU",
            Day::We => "WE",
            Day::Th => "TH",
            Day::Fr => "FR",
        })
    }
}

/// A clock time with minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Self {
        TimeOfDay { hour, minute }
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn minutes_since_midnight(self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }
}

impl FromStr for TimeOfDay {
    type Err = ();

    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        let (hour_str, minute_str) = s.split_once(':').ok_or(())?;
        let hour: u8 = hour_str.trim().parse().map_err(|_| ())?;
        let minute: u8 = minute_str.trim().parse().map_err(|_| ())?;
        if hour < 24 && minute < 60 {
            Ok(TimeOfDay { hour, minute })
        } else {
            Err(())
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour, self.minute)
    }
}

/// Closed-open minute interval on a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    pub start: u32,
    pub end: u32,
}

impl TimeInterval {
    pub fn overlaps(self, other: TimeInterval) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }
}

pub fn indent_lines(msg: &str, indentation: usize) -> String {
    #[allow(clippy::format_collect)]
    msg.lines()
        .map(|line| format!("{}{line}\n", " ".repeat(indentation)))
        .collect::<String>()
}

pub struct TwoCombIter<'a, T> {
    slice: &'a [T],
    outer_index: usize,
    inner_index: usize,
}

impl<'a, T> TwoCombIter<'a, T> {
    pub fn new(slice: &'a [T]) -> Self {
        TwoCombIter {
            slice,
            outer_index: 1,
            inner_index: 0,
        }
    }
}

impl<T> Iterator for TwoCombIter<'_, T>
where
    T: Copy,
{
    type Item = (T, T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (old_inner, old_outer) = (self.inner_index, self.outer_index);

            if self.inner_index == self.outer_index {
                self.outer_index += 1;
                self.inner_index = 0;
                continue;
            }
            self.inner_index += 1;

            if old_outer >= self.slice.len() {
                return None;
            }
            return Some((self.slice[old_inner], self.slice[old_outer]));
        }
    }
}
