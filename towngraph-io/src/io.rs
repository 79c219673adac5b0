//! Route list readers and writers.

use std::collections::VecDeque;
use std::io;

use itertools::Itertools;
use log::debug;
use towngraph::{Graph, GraphBuilder, Route};

use crate::error::{Error, ParseError};

/// Optional prefix of a route list, as in `Graph: AB5, BC4`.
const GRAPH_PREFIX: &str = "Graph:";

/// A trait for objects that can read `Route`s.
pub trait ReadRoute {
    /// Read a `Route` from this object.
    ///
    /// # Errors
    ///
    /// A call to `read_route` may generate an error to indicate that
    /// the operation could not be completed.
    fn read_route(&mut self) -> Result<Option<Route>, Error>;

    /// Get an iterator over the routes in this reader.
    fn routes(self) -> Routes<Self>
    where
        Self: Sized,
    {
        Routes { reader: self }
    }
}

/// A reader for route lists.
pub struct Reader<R> {
    read: R,
    pending: VecDeque<String>,
    line: usize,
}

impl<R: io::BufRead> Reader<R> {
    /// Construct a new reader from an object that implements the
    /// `io::BufRead` trait.
    pub fn new(read: R) -> Reader<R> {
        Reader {
            read,
            pending: VecDeque::new(),
            line: 0,
        }
    }

    /// Get the number of the line that was read last, starting at 1.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Read all routes and construct a graph from them.
    ///
    /// # Errors
    ///
    /// Fails on the first route that cannot be read or added to the
    /// graph, and when the route list does not contain any route.
    pub fn read_graph(mut self) -> Result<Graph, Error> {
        let mut builder = GraphBuilder::new();
        let mut n_routes = 0;

        while let Some(route) = self.read_route()? {
            let line = self.line;
            builder
                .add_route(route)
                .map_err(|source| ParseError::Route { line, source })?;
            n_routes += 1;
        }

        if n_routes == 0 {
            return Err(ParseError::Empty.into());
        }

        debug!("Read {} routes from {} lines", n_routes, self.line);

        Ok(builder.build())
    }

    fn read_token(&mut self) -> Result<Option<String>, Error> {
        let mut line = String::new();

        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }

            line.clear();

            // End of reader.
            if self.read.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            self.line += 1;

            let content = line.trim();
            if content.starts_with('#') {
                continue;
            }

            let content = content.strip_prefix(GRAPH_PREFIX).unwrap_or(content);
            self.pending.extend(
                content
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|token| !token.is_empty())
                    .map(str::to_owned),
            );
        }
    }
}

impl<R: io::BufRead> IntoIterator for Reader<R> {
    type Item = Result<Route, Error>;
    type IntoIter = Routes<Reader<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes()
    }
}

impl<R: io::BufRead> ReadRoute for Reader<R> {
    fn read_route(&mut self) -> Result<Option<Route>, Error> {
        let token = match self.read_token()? {
            Some(token) => token,
            None => return Ok(None),
        };

        let line = self.line;
        let route = token
            .parse::<Route>()
            .map_err(|source| ParseError::Route { line, source })?;

        Ok(Some(route))
    }
}

/// An iterator over the routes in a `Reader`.
pub struct Routes<R>
where
    R: ReadRoute,
{
    reader: R,
}

impl<R> Iterator for Routes<R>
where
    R: ReadRoute,
{
    type Item = Result<Route, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_route().transpose()
    }
}

/// A trait for objects that can write a `Graph`'s routes.
pub trait WriteGraph {
    /// Write the routes of a graph into this object.
    ///
    /// # Errors
    ///
    /// A call to `write_graph` may generate an error to indicate that
    /// the operation could not be completed.
    fn write_graph(&mut self, graph: &Graph) -> Result<(), Error>;
}

/// A writer for route lists.
///
/// This writer writes the routes of a graph as a single line of
/// comma-separated edge tokens, in the order in which the routes
/// were added to the graph.
pub struct Writer<W> {
    write: W,
}

impl<W: io::Write> Writer<W> {
    /// Construct a new writer from an object that implements the `io::Write`
    /// trait.
    pub fn new(write: W) -> Writer<W> {
        Writer { write }
    }

    /// Borrow the embedded writer. Getting the underlying writer is often
    /// useful when the writer writes to a memory object.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::str;
    ///
    /// use towngraph::Graph;
    /// use towngraph_io::io::{Writer, WriteGraph};
    ///
    /// let mut writer = Writer::new(Vec::new());
    /// writer.write_graph(&Graph::from_routes(&["AB5", "BC4"]).unwrap()).unwrap();
    ///
    /// assert_eq!(str::from_utf8(writer.get_ref()).unwrap(), "AB5, BC4\n");
    /// ```
    pub fn get_ref(&self) -> &W {
        &self.write
    }

    /// Unwrap the embedded writer.
    pub fn into_inner(self) -> W {
        self.write
    }
}

impl<W: io::Write> WriteGraph for Writer<W> {
    fn write_graph(&mut self, graph: &Graph) -> Result<(), Error> {
        writeln!(self.write, "{}", graph.routes().join(", "))?;
        Ok(())
    }
}
