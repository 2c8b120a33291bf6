use crate::array::{RecordArray, TupleArray};
use crate::buffer::BufferOptions;
use crate::builder::{Builder, Event, UnknownBuilder};
use crate::error::{Error, Result};
use crate::nullmask::NullmaskBuilder;
use crate::types::DataType;


pub struct TupleBuilder {
    fields: Vec<Builder>,
    nulls: NullmaskBuilder,
    len: usize,
    begun: bool,
    current: Option<usize>,
    options: BufferOptions,
}


impl TupleBuilder {
    pub fn new(options: BufferOptions, arity: usize) -> Self {
        Self {
            fields: (0..arity)
                .map(|_| Builder::Unknown(UnknownBuilder::new(options)))
                .collect(),
            nulls: NullmaskBuilder::new(),
            len: 0,
            begun: false,
            current: None,
            options,
        }
    }

    pub fn with_nulls(options: BufferOptions, arity: usize, count: usize) -> Self {
        let mut builder = Self::new(options, arity);
        for field in builder.fields.iter_mut() {
            *field = Builder::Unknown(UnknownBuilder::with_nulls(options, count));
        }
        builder.nulls.append_many(false, count);
        builder.len = count;
        builder
    }

    pub fn options(&self) -> BufferOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    pub fn begun(&self) -> bool {
        self.begun
    }

    pub fn fields(&self) -> &[Builder] {
        &self.fields
    }

    pub fn begin(&mut self) {
        debug_assert!(!self.begun);
        self.begun = true;
        self.current = None
    }

    pub fn append_null(&mut self) -> Result<()> {
        debug_assert!(!self.begun);
        for field in self.fields.iter_mut() {
            field.event(Event::Null)?;
        }
        self.nulls.append(false);
        self.len += 1;
        Ok(())
    }

    pub(crate) fn event(&mut self, ev: Event<'_>) -> Result<()> {
        debug_assert!(self.begun);
        if let Some(k) = self.current {
            if self.fields[k].is_active() {
                self.fields[k].event(ev)?;
                if !self.fields[k].is_active() {
                    self.current = None;
                }
                return Ok(());
            }
        }
        match ev {
            Event::Index(i) => {
                // slot i comes into existence on first touch, back-filled
                // with nulls for all prior elements
                while self.fields.len() <= i {
                    self.fields.push(Builder::Unknown(UnknownBuilder::with_nulls(
                        self.options,
                        self.len,
                    )));
                }
                self.current = Some(i);
                Ok(())
            }
            Event::EndTuple => self.close(),
            Event::EndList => Err(Error::Sequence("end_list without a matching begin_list")),
            Event::Field(_) | Event::EndRecord => {
                Err(Error::Sequence("record operation outside of an open record"))
            }
            ev => match self.current {
                Some(k) => {
                    self.fields[k].event(ev)?;
                    if !self.fields[k].is_active() {
                        // slot done, the next value needs a fresh index()
                        self.current = None;
                    }
                    Ok(())
                }
                None => Err(Error::Sequence("no tuple slot selected")),
            },
        }
    }

    fn close(&mut self) -> Result<()> {
        for field in self.fields.iter_mut() {
            if field.len() == self.len {
                field.event(Event::Null)?;
            }
        }
        self.nulls.append(true);
        self.len += 1;
        self.begun = false;
        self.current = None;
        Ok(())
    }

    pub fn clear(&mut self) {
        for field in self.fields.iter_mut() {
            field.clear();
        }
        self.nulls.clear();
        self.len = 0;
        self.begun = false;
        self.current = None
    }

    pub fn data_type(&self) -> DataType {
        DataType::Tuple(self.fields.iter().map(|f| f.data_type()).collect())
    }

    pub fn snapshot(&self) -> TupleArray {
        let len = self.len;
        TupleArray::new(
            self.fields.iter().map(|f| f.snapshot().slice(0, len)).collect(),
            self.nulls.snapshot(),
        )
    }

    pub fn finish(self) -> TupleArray {
        let len = self.len;
        TupleArray::new(
            self.fields
                .into_iter()
                .map(|f| f.finish().slice(0, len))
                .collect(),
            self.nulls.finish(),
        )
    }
}


pub struct RecordBuilder {
    fields: Vec<(String, Builder)>,
    nulls: NullmaskBuilder,
    len: usize,
    begun: bool,
    current: Option<usize>,
    disambiguator: i64,
    options: BufferOptions,
}


impl RecordBuilder {
    pub fn new(options: BufferOptions, disambiguator: i64) -> Self {
        Self {
            fields: Vec::new(),
            nulls: NullmaskBuilder::new(),
            len: 0,
            begun: false,
            current: None,
            disambiguator,
            options,
        }
    }

    pub fn with_nulls(options: BufferOptions, disambiguator: i64, count: usize) -> Self {
        let mut builder = Self::new(options, disambiguator);
        builder.nulls.append_many(false, count);
        builder.len = count;
        builder
    }

    pub fn options(&self) -> BufferOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Opaque shape identity: two records with different disambiguators
    /// never merge, even if their field sets coincide.
    pub fn disambiguator(&self) -> i64 {
        self.disambiguator
    }

    pub fn begun(&self) -> bool {
        self.begun
    }

    pub fn fields(&self) -> &[(String, Builder)] {
        &self.fields
    }

    pub fn begin(&mut self) {
        debug_assert!(!self.begun);
        self.begun = true;
        self.current = None
    }

    pub fn append_null(&mut self) -> Result<()> {
        debug_assert!(!self.begun);
        for (_, field) in self.fields.iter_mut() {
            field.event(Event::Null)?;
        }
        self.nulls.append(false);
        self.len += 1;
        Ok(())
    }

    pub(crate) fn event(&mut self, ev: Event<'_>) -> Result<()> {
        debug_assert!(self.begun);
        if let Some(k) = self.current {
            if self.fields[k].1.is_active() {
                self.fields[k].1.event(ev)?;
                if !self.fields[k].1.is_active() {
                    self.current = None;
                }
                return Ok(());
            }
        }
        match ev {
            Event::Field(name) => {
                let position = self.fields.iter().position(|(n, _)| n == name);
                let k = match position {
                    Some(k) => k,
                    None => {
                        // a field first seen now is null for every element
                        // appended before it
                        self.fields.push((
                            name.to_string(),
                            Builder::Unknown(UnknownBuilder::with_nulls(self.options, self.len)),
                        ));
                        self.fields.len() - 1
                    }
                };
                self.current = Some(k);
                Ok(())
            }
            Event::EndRecord => self.close(),
            Event::EndList => Err(Error::Sequence("end_list without a matching begin_list")),
            Event::Index(_) | Event::EndTuple => {
                Err(Error::Sequence("tuple operation outside of an open tuple"))
            }
            ev => match self.current {
                Some(k) => {
                    self.fields[k].1.event(ev)?;
                    if !self.fields[k].1.is_active() {
                        // field done, the next value needs a fresh field()
                        self.current = None;
                    }
                    Ok(())
                }
                None => Err(Error::Sequence("no record field selected")),
            },
        }
    }

    fn close(&mut self) -> Result<()> {
        for (_, field) in self.fields.iter_mut() {
            if field.len() == self.len {
                field.event(Event::Null)?;
            }
        }
        self.nulls.append(true);
        self.len += 1;
        self.begun = false;
        self.current = None;
        Ok(())
    }

    pub fn clear(&mut self) {
        for (_, field) in self.fields.iter_mut() {
            field.clear();
        }
        self.nulls.clear();
        self.len = 0;
        self.begun = false;
        self.current = None
    }

    pub fn data_type(&self) -> DataType {
        DataType::Record(
            self.fields
                .iter()
                .map(|(n, f)| (n.clone(), f.data_type()))
                .collect(),
        )
    }

    pub fn snapshot(&self) -> RecordArray {
        let len = self.len;
        RecordArray::new(
            self.fields
                .iter()
                .map(|(n, f)| (n.clone(), f.snapshot().slice(0, len)))
                .collect(),
            self.nulls.snapshot(),
        )
    }

    pub fn finish(self) -> RecordArray {
        let len = self.len;
        RecordArray::new(
            self.fields
                .into_iter()
                .map(|(n, f)| (n, f.finish().slice(0, len)))
                .collect(),
            self.nulls.finish(),
        )
    }
}
