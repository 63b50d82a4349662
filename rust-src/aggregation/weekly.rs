//! Weekly organization of subjects into days and timetable rows.

use std::collections::{BTreeMap, HashSet};

use crate::models::{Day, Modality, Subject, TimeRange};


/// Subjects grouped by weekday, each day sorted by start time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySchedule {
    days: [Vec<Subject>; 5],
}


impl WeeklySchedule {
    /// Subjects meeting on a given day, in start-time order.
    pub fn day(&self, day: Day) -> &[Subject] {
        &self.days[day.index()]
    }

    /// Iterate over all five days in display order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (Day, &[Subject])> + '_ {
        Day::ALL.into_iter().map(move |day| (day, self.day(day)))
    }

    /// Check if no day has any subject.
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }

    /// Distinct subjects in the schedule, in first-seen order.
    pub fn subjects(&self) -> Vec<&Subject> {
        let mut seen = HashSet::new();
        let mut subjects = Vec::new();

        for (_, day_subjects) in self.iter() {
            for subject in day_subjects {
                if seen.insert((&subject.name, subject.hours)) {
                    subjects.push(subject);
                }
            }
        }

        subjects
    }
}


/// One timetable row: a time range and the subject held on each day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub hours: TimeRange,
    pub cells: [Option<Subject>; 5],
}


impl TableRow {
    /// Row label, e.g. `18:00 - 21:00`.
    pub fn time_range(&self) -> String {
        self.hours.label()
    }

    /// Subject held on the given day in this row.
    pub fn cell(&self, day: Day) -> Option<&Subject> {
        self.cells[day.index()].as_ref()
    }
}


/// Subject counts by modality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub presencial: usize,
    pub virtual_count: usize,
    pub mixta: usize,
}


impl Summary {
    pub fn count(&self, modality: Modality) -> usize {
        match modality {
            Modality::Presencial => self.presencial,
            Modality::Virtual => self.virtual_count,
            Modality::Mixta => self.mixta,
        }
    }
}


/// Group subjects by day and sort each day by start time.
pub fn organize(subjects: &[Subject]) -> WeeklySchedule {
    let mut schedule = WeeklySchedule::default();

    // A day listed twice still places the subject once
    for subject in subjects {
        for day in Day::ALL.into_iter().filter(|day| subject.meets_on(*day)) {
            schedule.days[day.index()].push(subject.clone());
        }
    }

    // Stable sort keeps input order for equal start times
    for day_subjects in schedule.days.iter_mut() {
        day_subjects.sort_by_key(|s| s.hours.start);
    }

    schedule
}


/// Build timetable rows, one per distinct time range, sorted ascending.
pub fn table_rows(schedule: &WeeklySchedule) -> Vec<TableRow> {
    let mut rows: BTreeMap<TimeRange, TableRow> = BTreeMap::new();

    for (day, day_subjects) in schedule.iter() {
        for subject in day_subjects {
            let row = rows.entry(subject.hours).or_insert_with(|| TableRow {
                hours: subject.hours,
                cells: Default::default(),
            });

            let cell = &mut row.cells[day.index()];
            if let Some(existing) = cell.as_ref() {
                log::warn!(
                    "{} {}: '{}' overlaps '{}', keeping the first",
                    day,
                    subject.hours.label(),
                    subject.name,
                    existing.name
                );
            } else {
                *cell = Some(subject.clone());
            }
        }
    }

    rows.into_values().collect()
}


/// Count distinct subjects by modality.
pub fn summarize(schedule: &WeeklySchedule) -> Summary {
    let mut summary = Summary::default();

    for subject in schedule.subjects() {
        summary.total += 1;
        match subject.modality {
            Modality::Presencial => summary.presencial += 1,
            Modality::Virtual => summary.virtual_count += 1,
            Modality::Mixta => summary.mixta += 1,
        }
    }

    summary
}


#[cfg(test)]
mod tests {
    use super::*;

    fn subject(name: &str, start: &str, end: &str, days: &[Day], modality: Modality) -> Subject {
        Subject {
            name: name.to_string(),
            hours: TimeRange::parse(start, end).unwrap(),
            days: days.to_vec(),
            modality,
        }
    }

    fn sample_data() -> Vec<Subject> {
        vec![
            subject("Teoría de Algoritmos", "19:00", "22:00", &[Day::Lunes, Day::Jueves], Modality::Mixta),
            subject("Taller de programación 1", "18:00", "22:00", &[Day::Lunes, Day::Jueves], Modality::Virtual),
            subject("Probabilidad y Estadística", "18:00", "21:00", &[Day::Martes, Day::Miercoles], Modality::Presencial),
        ]
    }

    #[test]
    fn test_organize_by_days() {
        let schedule = organize(&sample_data());
        let days: Vec<Day> = schedule.iter().map(|(day, _)| day).collect();
        assert_eq!(days, Day::ALL.to_vec());
    }

    #[test]
    fn test_correct_subject_count_per_day() {
        let schedule = organize(&sample_data());

        assert_eq!(schedule.day(Day::Lunes).len(), 2);
        assert_eq!(schedule.day(Day::Martes).len(), 1);
        assert_eq!(schedule.day(Day::Miercoles).len(), 1);
        assert_eq!(schedule.day(Day::Jueves).len(), 2);
        assert_eq!(schedule.day(Day::Viernes).len(), 0);
    }

    #[test]
    fn test_repeated_day_counted_once() {
        let schedule = organize(&[subject(
            "Teoría de Algoritmos",
            "19:00",
            "22:00",
            &[Day::Lunes, Day::Lunes],
            Modality::Mixta,
        )]);

        assert_eq!(schedule.day(Day::Lunes).len(), 1);
    }

    #[test]
    fn test_time_sorting_within_days() {
        let schedule = organize(&sample_data());
        let lunes = schedule.day(Day::Lunes);

        assert_eq!(lunes[0].name, "Taller de programación 1");
        assert_eq!(lunes[1].name, "Teoría de Algoritmos");
    }

    #[test]
    fn test_empty_data() {
        let schedule = organize(&[]);

        assert!(schedule.is_empty());
        for (_, subjects) in schedule.iter() {
            assert!(subjects.is_empty());
        }
        assert!(table_rows(&schedule).is_empty());
    }

    #[test]
    fn test_table_rows_sorted_by_time_range() {
        let data = vec![
            subject("Teoría de Algoritmos", "19:00", "22:00", &[Day::Lunes, Day::Jueves], Modality::Mixta),
            subject("Matemáticas Discretas", "18:00", "21:00", &[Day::Martes, Day::Viernes], Modality::Presencial),
        ];
        let rows = table_rows(&organize(&data));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].time_range(), "18:00 - 21:00");
        assert_eq!(rows[1].time_range(), "19:00 - 22:00");
    }

    #[test]
    fn test_table_rows_assign_subjects_to_days() {
        let data = vec![
            subject("Teoría de Algoritmos", "19:00", "22:00", &[Day::Lunes, Day::Jueves], Modality::Mixta),
            subject("Matemáticas Discretas", "18:00", "21:00", &[Day::Martes, Day::Viernes], Modality::Presencial),
        ];
        let rows = table_rows(&organize(&data));

        assert_eq!(rows[0].cell(Day::Martes).unwrap().name, "Matemáticas Discretas");
        assert_eq!(rows[0].cell(Day::Viernes).unwrap().name, "Matemáticas Discretas");
        assert!(rows[0].cell(Day::Miercoles).is_none());

        assert_eq!(rows[1].cell(Day::Lunes).unwrap().name, "Teoría de Algoritmos");
        assert_eq!(rows[1].cell(Day::Jueves).unwrap().name, "Teoría de Algoritmos");
    }

    #[test]
    fn test_table_rows_keep_first_on_collision() {
        let data = vec![
            subject("Física", "08:00", "10:00", &[Day::Lunes], Modality::Presencial),
            subject("Química", "08:00", "10:00", &[Day::Lunes], Modality::Virtual),
        ];
        let rows = table_rows(&organize(&data));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cell(Day::Lunes).unwrap().name, "Física");
    }

    #[test]
    fn test_summary_counts_distinct_subjects() {
        let data = vec![
            subject("Teoría de Algoritmos", "19:00", "22:00", &[Day::Lunes, Day::Jueves], Modality::Mixta),
        ];
        let summary = summarize(&organize(&data));

        assert_eq!(summary.total, 1);
        assert_eq!(summary.count(Modality::Presencial), 0);
        assert_eq!(summary.count(Modality::Virtual), 0);
        assert_eq!(summary.count(Modality::Mixta), 1);
    }

    #[test]
    fn test_summary_full_sample() {
        let summary = summarize(&organize(&sample_data()));

        assert_eq!(summary.total, 3);
        assert_eq!(summary.presencial, 1);
        assert_eq!(summary.virtual_count, 1);
        assert_eq!(summary.mixta, 1);
    }
}
