use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use polars::prelude::*;

use crate::core::domain::{
    CollisionAnnotation, CollisionLevel, CollisionType, DayId, RoomId, SessionDetails, SessionId,
    SessionRecord, SlotInterval, TeacherId,
};
use crate::error::{ScheduleError, ScheduleResult};

pub const COL_ID: &str = "id";
pub const COL_SOLUTION_ID: &str = "idSolution";
pub const COL_SOLUTION_NAME: &str = "solutionName";
pub const COL_SOLUTION_INITIALS: &str = "solutionInitials";
pub const COL_TEACHER_ID: &str = "idTeacher";
pub const COL_TEACHER_NAME: &str = "teacherName";
pub const COL_DAY_ID: &str = "idDay";
pub const COL_INSTITUTION_ID: &str = "idInstitution";
pub const COL_UNIT_ID: &str = "idUnit";
pub const COL_UNIT_NAME: &str = "unitName";
pub const COL_UNIT_COURSE_ID: &str = "idUnitCourse";
pub const COL_COURSE_ID: &str = "idCourse";
pub const COL_COURSE_NAME: &str = "courseName";
pub const COL_CLASS_ID: &str = "idClass";
pub const COL_CLASS_NAME: &str = "className";
pub const COL_DISCIPLINE_ID: &str = "idDiscipline";
pub const COL_DISCIPLINE_NAME: &str = "disciplineName";
pub const COL_ROOM_ID: &str = "idRoom";
pub const COL_ROOM_NAME: &str = "roomName";
pub const COL_STUDENTS_NUMBER: &str = "studentsNumber";
pub const COL_SEQUENCE: &str = "sequence";
pub const COL_BEGIN_SLOT: &str = "idBeginSlot";
pub const COL_BEGIN_TIME_NAME: &str = "beginTimeName";
pub const COL_END_SLOT: &str = "idEndSlot";
pub const COL_END_TIME_NAME: &str = "endTimeName";
pub const COL_YEAR_ID: &str = "idYear";
pub const COL_TERM_ID: &str = "idTerm";
pub const COL_COLLISION_TYPE: &str = "idCollisionType";
pub const COL_COLLISION_LEVEL: &str = "collisionLevel";
pub const COL_COLLISION_SIZE: &str = "collisionSize";

/// Columns that must be present for detection to run.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_ID,
    COL_TEACHER_ID,
    COL_ROOM_ID,
    COL_DAY_ID,
    COL_BEGIN_SLOT,
    COL_END_SLOT,
];

/// Parse a schedule CSV into a Polars DataFrame with every column kept as text.
///
/// Typing happens row by row in [`dataframe_to_records`] so that a bad cell is
/// reported with its column and row.
pub fn parse_schedule_csv(csv_path: &Path) -> ScheduleResult<DataFrame> {
    if !csv_path.exists() {
        return Err(ScheduleError::io(
            csv_path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "schedule file not found"),
        ));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(csv_path.into()))?
        .finish()?;

    debug!(
        "Read {} row(s) and {} column(s) from {}",
        df.height(),
        df.width(),
        csv_path.display()
    );

    Ok(df)
}

/// Parse a schedule CSV directly into session records.
pub fn parse_schedule_csv_to_records(csv_path: &Path) -> ScheduleResult<Vec<SessionRecord>> {
    let df = parse_schedule_csv(csv_path)?;
    dataframe_to_records(&df)
}

/// Convert a text DataFrame into session records.
///
/// Required columns are listed in [`REQUIRED_COLUMNS`]; every other column is
/// optional and defaults to an empty string, zero or a neutral annotation.
/// Slot bounds are not validated here beyond being non-negative integers.
pub fn dataframe_to_records(df: &DataFrame) -> ScheduleResult<Vec<SessionRecord>> {
    let columns = TextColumns::new(df)?;
    let mut records = Vec::with_capacity(df.height());

    for row in 0..df.height() {
        records.push(columns.record(row)?);
    }

    Ok(records)
}

/// Convert session records into a DataFrame in the exported column order.
pub fn records_to_dataframe(records: &[SessionRecord]) -> ScheduleResult<DataFrame> {
    let n = records.len();

    let mut ids = Vec::with_capacity(n);
    let mut solution_ids = Vec::with_capacity(n);
    let mut solution_names = Vec::with_capacity(n);
    let mut solution_initials = Vec::with_capacity(n);
    let mut teacher_ids = Vec::with_capacity(n);
    let mut teacher_names = Vec::with_capacity(n);
    let mut day_ids = Vec::with_capacity(n);
    let mut institution_ids = Vec::with_capacity(n);
    let mut unit_ids = Vec::with_capacity(n);
    let mut unit_names = Vec::with_capacity(n);
    let mut unit_course_ids = Vec::with_capacity(n);
    let mut course_ids = Vec::with_capacity(n);
    let mut course_names = Vec::with_capacity(n);
    let mut class_ids = Vec::with_capacity(n);
    let mut class_names = Vec::with_capacity(n);
    let mut discipline_ids = Vec::with_capacity(n);
    let mut discipline_names = Vec::with_capacity(n);
    let mut room_ids = Vec::with_capacity(n);
    let mut room_names = Vec::with_capacity(n);
    let mut students = Vec::with_capacity(n);
    let mut sequences = Vec::with_capacity(n);
    let mut begin_slots = Vec::with_capacity(n);
    let mut begin_names = Vec::with_capacity(n);
    let mut end_slots = Vec::with_capacity(n);
    let mut end_names = Vec::with_capacity(n);
    let mut year_ids = Vec::with_capacity(n);
    let mut term_ids = Vec::with_capacity(n);
    let mut collision_types = Vec::with_capacity(n);
    let mut collision_levels = Vec::with_capacity(n);
    let mut collision_sizes = Vec::with_capacity(n);

    for record in records {
        let details = &record.details;

        ids.push(record.id.0);
        solution_ids.push(details.solution_id);
        solution_names.push(details.solution_name.clone());
        solution_initials.push(details.solution_initials.clone());
        teacher_ids.push(record.teacher.0);
        teacher_names.push(details.teacher_name.clone());
        day_ids.push(record.day.0);
        institution_ids.push(details.institution_id);
        unit_ids.push(details.unit_id);
        unit_names.push(details.unit_name.clone());
        unit_course_ids.push(details.unit_course_id);
        course_ids.push(details.course_id);
        course_names.push(details.course_name.clone());
        class_ids.push(details.class_id);
        class_names.push(details.class_name.clone());
        discipline_ids.push(details.discipline_id);
        discipline_names.push(details.discipline_name.clone());
        room_ids.push(record.room.0);
        room_names.push(details.room_name.clone());
        students.push(details.students_number);
        sequences.push(details.sequence);
        begin_slots.push(record.slots.begin);
        begin_names.push(details.begin_time_name.clone());
        end_slots.push(record.slots.end);
        end_names.push(details.end_time_name.clone());
        year_ids.push(details.year_id);
        term_ids.push(details.term_id);
        collision_types.push(record.annotation.collision_type.code().to_string());
        collision_levels.push(record.annotation.level.code().to_string());
        collision_sizes.push(record.annotation.size_minutes);
    }

    let df = df!(
        COL_ID => ids,
        COL_SOLUTION_ID => solution_ids,
        COL_SOLUTION_NAME => solution_names,
        COL_SOLUTION_INITIALS => solution_initials,
        COL_TEACHER_ID => teacher_ids,
        COL_TEACHER_NAME => teacher_names,
        COL_DAY_ID => day_ids,
        COL_INSTITUTION_ID => institution_ids,
        COL_UNIT_ID => unit_ids,
        COL_UNIT_NAME => unit_names,
        COL_UNIT_COURSE_ID => unit_course_ids,
        COL_COURSE_ID => course_ids,
        COL_COURSE_NAME => course_names,
        COL_CLASS_ID => class_ids,
        COL_CLASS_NAME => class_names,
        COL_DISCIPLINE_ID => discipline_ids,
        COL_DISCIPLINE_NAME => discipline_names,
        COL_ROOM_ID => room_ids,
        COL_ROOM_NAME => room_names,
        COL_STUDENTS_NUMBER => students,
        COL_SEQUENCE => sequences,
        COL_BEGIN_SLOT => begin_slots,
        COL_BEGIN_TIME_NAME => begin_names,
        COL_END_SLOT => end_slots,
        COL_END_TIME_NAME => end_names,
        COL_YEAR_ID => year_ids,
        COL_TERM_ID => term_ids,
        COL_COLLISION_TYPE => collision_types,
        COL_COLLISION_LEVEL => collision_levels,
        COL_COLLISION_SIZE => collision_sizes,
    )?;

    Ok(df)
}

/// Write session records, annotations included, to a CSV file with a header row.
///
/// Rows are staged in a temporary file next to `csv_path` and renamed over it
/// once complete, so a failed write leaves any existing file untouched.
pub fn write_schedule_csv(csv_path: &Path, records: &[SessionRecord]) -> ScheduleResult<()> {
    let mut df = records_to_dataframe(records)?;

    let dir = match csv_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(|e| ScheduleError::io(dir, e))?;

    CsvWriter::new(staged.as_file_mut())
        .include_header(true)
        .finish(&mut df)?;

    staged
        .persist(csv_path)
        .map_err(|e| ScheduleError::io(csv_path, e.error))?;

    debug!("Wrote {} row(s) to {}", df.height(), csv_path.display());
    Ok(())
}

/// Borrowed text columns of a schedule DataFrame.
struct TextColumns<'a> {
    required: [&'a StringChunked; 6],
    optional: HashMap<&'static str, &'a StringChunked>,
}

const OPTIONAL_COLUMNS: [&str; 24] = [
    COL_SOLUTION_ID,
    COL_SOLUTION_NAME,
    COL_SOLUTION_INITIALS,
    COL_TEACHER_NAME,
    COL_INSTITUTION_ID,
    COL_UNIT_ID,
    COL_UNIT_NAME,
    COL_UNIT_COURSE_ID,
    COL_COURSE_ID,
    COL_COURSE_NAME,
    COL_CLASS_ID,
    COL_CLASS_NAME,
    COL_DISCIPLINE_ID,
    COL_DISCIPLINE_NAME,
    COL_ROOM_NAME,
    COL_STUDENTS_NUMBER,
    COL_SEQUENCE,
    COL_BEGIN_TIME_NAME,
    COL_END_TIME_NAME,
    COL_YEAR_ID,
    COL_TERM_ID,
    COL_COLLISION_TYPE,
    COL_COLLISION_LEVEL,
    COL_COLLISION_SIZE,
];

impl<'a> TextColumns<'a> {
    fn new(df: &'a DataFrame) -> ScheduleResult<Self> {
        let text = |name: &str| -> ScheduleResult<&'a StringChunked> {
            df.column(name)
                .map_err(|_| ScheduleError::MissingColumn(name.to_string()))?
                .str()
                .map_err(ScheduleError::from)
        };

        let required = [
            text(COL_ID)?,
            text(COL_TEACHER_ID)?,
            text(COL_ROOM_ID)?,
            text(COL_DAY_ID)?,
            text(COL_BEGIN_SLOT)?,
            text(COL_END_SLOT)?,
        ];

        let optional = OPTIONAL_COLUMNS
            .iter()
            .filter_map(|&name| {
                df.column(name)
                    .ok()
                    .and_then(|c| c.str().ok())
                    .map(|values| (name, values))
            })
            .collect();

        Ok(Self { required, optional })
    }

    fn required_int(&self, slot: usize, row: usize) -> ScheduleResult<i64> {
        let name = REQUIRED_COLUMNS[slot];
        let raw = self.required[slot].get(row).unwrap_or("");
        parse_field(name, row, raw)
    }

    fn required_slot(&self, slot: usize, row: usize) -> ScheduleResult<u32> {
        let name = REQUIRED_COLUMNS[slot];
        let raw = self.required[slot].get(row).unwrap_or("");
        parse_field(name, row, raw)
    }

    fn optional_raw(&self, name: &str, row: usize) -> &'a str {
        self.optional
            .get(name)
            .and_then(|values| values.get(row))
            .unwrap_or("")
    }

    fn text(&self, name: &str, row: usize) -> String {
        self.optional_raw(name, row).trim().to_string()
    }

    fn int(&self, name: &str, row: usize) -> ScheduleResult<i64> {
        let raw = self.optional_raw(name, row);
        if raw.trim().is_empty() {
            return Ok(0);
        }
        parse_field(name, row, raw)
    }

    fn code<T: FromStr>(&self, name: &str, row: usize) -> ScheduleResult<T> {
        let raw = self.optional_raw(name, row);
        raw.parse::<T>().map_err(|_| ScheduleError::InvalidField {
            column: name.to_string(),
            row,
            value: raw.to_string(),
        })
    }

    fn record(&self, row: usize) -> ScheduleResult<SessionRecord> {
        let details = SessionDetails {
            solution_id: self.int(COL_SOLUTION_ID, row)?,
            solution_name: self.text(COL_SOLUTION_NAME, row),
            solution_initials: self.text(COL_SOLUTION_INITIALS, row),
            teacher_name: self.text(COL_TEACHER_NAME, row),
            institution_id: self.int(COL_INSTITUTION_ID, row)?,
            unit_id: self.int(COL_UNIT_ID, row)?,
            unit_name: self.text(COL_UNIT_NAME, row),
            unit_course_id: self.int(COL_UNIT_COURSE_ID, row)?,
            course_id: self.int(COL_COURSE_ID, row)?,
            course_name: self.text(COL_COURSE_NAME, row),
            class_id: self.int(COL_CLASS_ID, row)?,
            class_name: self.text(COL_CLASS_NAME, row),
            discipline_id: self.int(COL_DISCIPLINE_ID, row)?,
            discipline_name: self.text(COL_DISCIPLINE_NAME, row),
            room_name: self.text(COL_ROOM_NAME, row),
            students_number: self.int(COL_STUDENTS_NUMBER, row)?,
            sequence: self.int(COL_SEQUENCE, row)?,
            begin_time_name: self.text(COL_BEGIN_TIME_NAME, row),
            end_time_name: self.text(COL_END_TIME_NAME, row),
            year_id: self.int(COL_YEAR_ID, row)?,
            term_id: self.int(COL_TERM_ID, row)?,
        };

        let size_raw = self.optional_raw(COL_COLLISION_SIZE, row);
        let size_minutes = if size_raw.trim().is_empty() {
            0
        } else {
            parse_field(COL_COLLISION_SIZE, row, size_raw)?
        };

        let annotation = CollisionAnnotation {
            collision_type: self.code::<CollisionType>(COL_COLLISION_TYPE, row)?,
            level: self.code::<CollisionLevel>(COL_COLLISION_LEVEL, row)?,
            size_minutes,
        };

        // Ordering of the bounds is checked by the validator, not here.
        let slots = SlotInterval {
            begin: self.required_slot(4, row)?,
            end: self.required_slot(5, row)?,
        };

        Ok(SessionRecord {
            id: SessionId(self.required_int(0, row)?),
            teacher: TeacherId(self.required_int(1, row)?),
            room: RoomId(self.required_int(2, row)?),
            day: DayId(self.required_int(3, row)?),
            slots,
            details,
            annotation,
        })
    }
}

fn parse_field<T: FromStr>(column: &str, row: usize, raw: &str) -> ScheduleResult<T> {
    raw.trim().parse::<T>().map_err(|_| ScheduleError::InvalidField {
        column: column.to_string(),
        row,
        value: raw.to_string(),
    })
}
