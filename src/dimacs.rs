use std::collections::{HashMap, VecDeque};
use std::fs;

use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, multispace0, not_line_ending, space1};
use nom::combinator::map_res;
use nom::multi::many0;
use nom::sequence::{preceded, separated_pair, terminated, tuple};

use crate::error::{ProximityError, Result};
use crate::tree::{TreeInstance, VertexId};


/** reads a tree from file, returns (n,m,adj_list)

format (indices start at 1):
```text
c optional comments
p tree 4 3
e 1 2
e 2 3
e 3 4
```
the adjacency lists follow the order in which the edges appear in the file.
*/
pub fn read_from_file(filename:&str) -> Result<(usize, usize, Vec<Vec<VertexId>>)> {
    let content = fs::read_to_string(filename)?;
    parse_tree(content.as_str())
}

/// parses the content of a tree file, returns (n,m,adj_list)
pub fn parse_tree(content:&str) -> Result<(usize, usize, Vec<Vec<VertexId>>)> {
    let content = content.replace("\r","");
    let (s1,_) = preceded(multispace0, skip_comments)(content.as_str())
        .map_err(|e| ProximityError::Parse(format!("unable to skip comments: {:?}", e)))?;
    let (mut s2,(n,m)) = read_header(s1)
        .map_err(|e| ProximityError::Parse(format!("unable to read header: {:?}", e)))?;
    check_header(n, m, s2)?;
    let mut adj_list = vec![Vec::new() ; n];
    let mut check_nb_edges = 0;
    loop {
        s2 = match skip_comments(s2) {
            Ok((remaining,_)) => remaining,
            Err(e) => return Err(ProximityError::Parse(format!("{:?}", e))),
        };
        if s2.is_empty() { break; }
        let (remaining,(a,b)) = read_edge(s2)
            .map_err(|e| ProximityError::Parse(format!("unable to read edge {}: {:?}", check_nb_edges+1, e)))?;
        if a == 0 || b == 0 || a > n || b > n {
            return Err(ProximityError::Parse(format!("edge ({},{}) out of range [1,{}]", a, b, n)));
        }
        adj_list[a-1].push(b-1);
        adj_list[b-1].push(a-1);
        check_nb_edges += 1;
        s2 = remaining;
    }
    if check_nb_edges != m {
        return Err(ProximityError::Parse(
            format!("header announces {} edges, found {}", m, check_nb_edges)
        ));
    }
    Ok((n, m, adj_list))
}

/** rejects a header that cannot describe a tree given in the remaining input
(checked before allocating the n adjacency lists) */
fn check_header(n:usize, m:usize, remaining:&str) -> Result<()> {
    if n == 0 {
        return Err(ProximityError::Parse("header announces an empty tree".to_string()));
    }
    if m != n-1 {
        return Err(ProximityError::Parse(
            format!("header announces {} edges, a tree on {} nodes has {}", m, n, n-1)
        ));
    }
    let nb_lines = remaining.lines().count();
    if m > nb_lines {
        return Err(ProximityError::Parse(
            format!("header announces {} edges, only {} lines remain", m, nb_lines)
        ));
    }
    Ok(())
}

/// skips a single comment
fn skip_comment(s:&str) -> IResult<&str, &str> {
    terminated(preceded(tag("c"), not_line_ending), multispace0)(s)
}

/// skips all comments
pub fn skip_comments(s:&str) -> IResult<&str, Vec<&str>> {
    many0(skip_comment)(s)
}

/// reads a non-negative integer
fn read_integer(s:&str) -> IResult<&str, usize> {
    map_res(digit1, |d:&str| d.parse::<usize>())(s)
}

/// reads two numbers separated by spaces (and the trailing line break)
fn read_two_integers(s:&str) -> IResult<&str, (usize,usize)> {
    terminated(separated_pair(read_integer, space1, read_integer), multispace0)(s)
}

/// reads header containing (n,m)
pub fn read_header(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(
        tuple((tag("p"), space1, alt((tag("tree"), tag("edge"))), space1)),
        read_two_integers
    )(s)
}

/// reads edge line (WARNING: indices start at 1 in this format)
pub fn read_edge(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(tuple((tag("e"), space1)), read_two_integers)(s)
}

/** edges in an order that rebuilds every adjacency list when read back: if two edges
share node u, the one listed first in the adjacency list of u comes first.
On a tree, these precedences never form a cycle (two edges share at most one node),
so a topological order (Kahn) always covers every edge.
*/
fn edges_in_adjacency_order(inst:&TreeInstance) -> Vec<(VertexId,VertexId)> {
    let edges = inst.edges();
    let ids:HashMap<(VertexId,VertexId),usize> = edges.iter().enumerate()
        .map(|(i,e)| (*e,i))
        .collect();
    let edge_id = |u:VertexId, v:VertexId| ids.get(&(u.min(v), u.max(v))).copied();
    let mut successors:Vec<Vec<usize>> = vec![Vec::new() ; edges.len()];
    let mut nb_predecessors:Vec<usize> = vec![0 ; edges.len()];
    for u in 0..inst.nb_vertices() {
        for pair in inst.neighbors(u).windows(2) {
            if let (Some(e),Some(f)) = (edge_id(u,pair[0]), edge_id(u,pair[1])) {
                successors[e].push(f);
                nb_predecessors[f] += 1;
            }
        }
    }
    let mut ready:VecDeque<usize> = (0..edges.len())
        .filter(|e| nb_predecessors[*e] == 0)
        .collect();
    let mut res = Vec::with_capacity(edges.len());
    while let Some(e) = ready.pop_front() {
        res.push(edges[e]);
        for f in &successors[e] {
            nb_predecessors[*f] -= 1;
            if nb_predecessors[*f] == 0 { ready.push_back(*f); }
        }
    }
    res
}

/** writes a string encoding the tree (use this to export an instance).
reading it back gives the same adjacency lists, in the same order.
*/
pub fn tree_to_string(inst:&TreeInstance) -> String {
    let mut res = format!("p tree {} {}\n", inst.nb_vertices(), inst.nb_edges());
    for (a,b) in edges_in_adjacency_order(inst) {
        res += format!("e {} {}\n", a+1, b+1).as_str();
    }
    res
}

/** writes a tree into a file */
pub fn write_to_file(inst:&TreeInstance, filename:&str) -> Result<()> {
    fs::write(filename, tree_to_string(inst))?;
    Ok(())
}
